use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sevabrata_common::Config;
use sevabrata_content::ContentClient;
use sevabrata_site::{build_router, reports, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sevabrata=info".parse()?))
        .init();

    let config = Config::site_from_env();

    let content = ContentClient::new(&config.content_base_url)?;
    let state = Arc::new(AppState {
        content,
        content_base_url: config.content_base_url.trim_end_matches('/').to_string(),
        reports: reports::builtin_reports(),
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.site_host, config.site_port);
    info!("Sevabrata site starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
