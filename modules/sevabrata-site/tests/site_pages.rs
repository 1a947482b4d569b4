//! Page rendering tests: a stub content host behind the real router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower::ServiceExt;

use sevabrata_content::ContentClient;
use sevabrata_site::{build_router, reports, AppState};

async fn serve_content(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn site_against(content_router: Router) -> Router {
    let base = serve_content(content_router).await;
    let state = Arc::new(AppState {
        content: ContentClient::new(&base).unwrap(),
        content_base_url: base,
        reports: reports::builtin_reports(),
    });
    build_router(state)
}

async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn campaigns_page_renders_cards_from_the_host() {
    let content = Router::new()
        .route(
            "/campaigns/active/manifest.json",
            get(|| async { Json(json!({ "campaigns": ["tuku.json"] })) }),
        )
        .route(
            "/campaigns/active/tuku.json",
            get(|| async {
                Json(json!({
                    "id": "tuku-kidney-transplant",
                    "title": "Help Tuku Fight Kidney Disease",
                    "shortDescription": "Kidney transplant support",
                    "targetAmount": 500000,
                    "raisedAmount": 125000,
                    "status": "active",
                    "urgency": "high",
                    "lastUpdated": "2024-03-15"
                }))
            }),
        );

    let app = site_against(content).await;
    let (status, body) = get_page(&app, "/campaigns").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Help Tuku Fight Kidney Disease"));
    assert!(body.contains("Urgent"));
    assert!(body.contains("₹1,25,000 raised"));
    assert!(body.contains("25%"));
}

#[tokio::test]
async fn empty_host_renders_placeholders_not_errors() {
    let app = site_against(Router::new()).await;

    let (status, body) = get_page(&app, "/campaigns").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("No active campaigns found.").count(), 1);

    let (status, body) = get_page(&app, "/stories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.matches("No success stories available at this time.").count(),
        1
    );

    let (status, body) = get_page(&app, "/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.matches("No news articles available at this time.").count(),
        1
    );
}

#[tokio::test]
async fn unknown_campaign_is_a_friendly_404() {
    let app = site_against(Router::new()).await;
    let (status, body) = get_page(&app, "/campaigns/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Campaign not found."));
}

#[tokio::test]
async fn reports_page_uses_the_builtin_list() {
    let app = site_against(Router::new()).await;
    let (status, body) = get_page(&app, "/reports").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sevabrata Activity Report 2019-2024"));
    assert!(body.contains("Download"));
}

#[tokio::test]
async fn responses_are_marked_no_store() {
    let app = site_against(Router::new()).await;
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "no-store"
    );
}
