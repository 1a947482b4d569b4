//! Admin panel for the Sevabrata content set: password-gated dashboard,
//! campaign and story management, and a reload action that refetches from
//! the content host. Edits live in an in-memory store for the lifetime of
//! the process; the static host has no write path.

pub mod auth;
pub mod pages;
pub mod store;
pub mod templates;

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, HeaderValue},
    response::Redirect,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::set_header::SetResponseHeaderLayer;

use sevabrata_common::Config;
use sevabrata_content::ContentClient;

use store::ContentStore;

pub struct AppState {
    pub config: Config,
    pub content: ContentClient,
    pub store: ContentStore,
    pub login_attempts: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl AppState {
    pub fn new(config: Config, content: ContentClient) -> Self {
        Self {
            config,
            content,
            store: ContentStore::new(),
            login_attempts: Mutex::new(HashMap::new()),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/admin") }))
        .route("/admin/login", get(pages::login_page).post(pages::login_submit))
        .route("/admin/logout", post(pages::logout))
        .route("/admin", get(pages::dashboard))
        .route("/admin/reload", post(pages::reload_content))
        .route(
            "/admin/campaigns",
            get(pages::campaigns_page).post(pages::add_campaign),
        )
        .route("/admin/campaigns/{id}", post(pages::update_campaign))
        .route("/admin/campaigns/{id}/edit", get(pages::edit_campaign_page))
        .route("/admin/campaigns/{id}/toggle", post(pages::toggle_campaign))
        .route(
            "/admin/campaigns/{id}/complete",
            post(pages::complete_campaign),
        )
        .route(
            "/admin/stories",
            get(pages::stories_page).post(pages::add_story),
        )
        .route("/admin/stories/{id}", post(pages::update_story))
        .route("/admin/stories/{id}/edit", get(pages::edit_story_page))
        .route("/admin/stories/{id}/delete", post(pages::delete_story))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
        // Admin pages carry session state; never let browsers cache them
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Log method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
