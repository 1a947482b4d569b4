use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sevabrata_admin::{build_router, AppState};
use sevabrata_common::Config;
use sevabrata_content::ContentClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sevabrata=info".parse()?))
        .init();

    let config = Config::admin_from_env();

    let content = ContentClient::new(&config.content_base_url)?;
    let state = Arc::new(AppState::new(config.clone(), content));

    // Initial load. Loader failures degrade to empty collections; the
    // reload action can pick things up once the host is reachable.
    let (campaigns, stories, counts) = tokio::join!(
        state.content.load_all_campaigns(),
        state.content.load_success_stories(),
        state.content.campaign_counts()
    );
    info!(
        campaigns = campaigns.len(),
        stories = stories.len(),
        "Loaded content from {}",
        config.content_base_url
    );
    state.store.replace_all(campaigns, stories, counts).await;

    #[cfg(debug_assertions)]
    if state.store.is_empty().await {
        let (campaigns, stories, counts) = sevabrata_admin::store::sample_data();
        info!("Content host returned nothing; seeding sample data (debug build only)");
        state.store.replace_all(campaigns, stories, counts).await;
    }

    let app = build_router(state);

    let addr = format!("{}:{}", config.admin_host, config.admin_port);
    info!("Sevabrata admin panel starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
