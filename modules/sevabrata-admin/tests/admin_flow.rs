//! Login and management flow tests against the real router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use sevabrata_admin::store::CampaignDraft;
use sevabrata_admin::{build_router, AppState};
use sevabrata_common::Config;
use sevabrata_content::ContentClient;

const PASSWORD: &str = "seva-test-password";

fn test_config() -> Config {
    Config {
        // Nothing listens here; loads degrade to empty collections
        content_base_url: "http://127.0.0.1:9".to_string(),
        site_host: String::new(),
        site_port: 0,
        admin_host: "127.0.0.1".to_string(),
        admin_port: 0,
        admin_password: PASSWORD.to_string(),
        session_secret: "test-session-secret".to_string(),
    }
}

fn app() -> (Router, Arc<AppState>) {
    let config = test_config();
    let content = ContentClient::new(&config.content_base_url).unwrap();
    let state = Arc::new(AppState::new(config, content));
    (build_router(state.clone()), state)
}

fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    request(Method::POST, uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_request(
            "/admin/login",
            &format!("password={PASSWORD}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets the session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn unauthenticated_requests_redirect_to_login() {
    let (app, _) = app();

    for uri in ["/admin", "/admin/campaigns", "/admin/stories"] {
        let response = app
            .clone()
            .oneshot(request(Method::GET, uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/login"
        );
    }
}

#[tokio::test]
async fn wrong_password_is_rejected_without_a_cookie() {
    let (app, _) = app();

    let response = app
        .oneshot(form_request("/admin/login", "password=wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/login?error=bad"
    );
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn correct_password_opens_a_session() {
    let (app, _) = app();
    let cookie = login(&app).await;

    let response = app
        .oneshot(
            request(Method::GET, "/admin")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Dashboard"));
    assert!(body.contains("Total Campaigns"));
}

#[tokio::test]
async fn garbage_cookie_does_not_pass_the_gate() {
    let (app, _) = app();

    let response = app
        .oneshot(
            request(Method::GET, "/admin")
                .header(header::COOKIE, "sb_admin_session=admin|9999999999|deadbeef")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/login"
    );
}

#[tokio::test]
async fn session_gated_mutations_round_trip() {
    let (app, _) = app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(
            request(Method::POST, "/admin/campaigns")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, &cookie)
                .body(Body::from(
                    "title=Help+Meena&shortDescription=Liver+transplant&targetAmount=800000&raisedAmount=50000",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, "/admin/campaigns?notice=saved");

    // Follow the redirect as a browser would; the notice banner only
    // renders on the redirected-to URL.
    let response = app
        .oneshot(
            request(Method::GET, &location)
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Help Meena"));
    assert!(body.contains("in memory"));
}

#[tokio::test]
async fn reload_discards_in_memory_edits() {
    let (app, state) = app();
    let cookie = login(&app).await;

    state
        .store
        .add_campaign(CampaignDraft {
            title: "Ephemeral".to_string(),
            short_description: "Only lives until reload".to_string(),
            target_amount: 10_000,
            ..Default::default()
        })
        .await;

    // The content host is unreachable, so reload replaces the store with
    // the empty collections the loaders degrade to.
    let response = app
        .clone()
        .oneshot(
            request(Method::POST, "/admin/reload")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin?notice=reloaded"
    );

    assert!(state.store.campaigns().await.is_empty());
}

#[tokio::test]
async fn login_attempts_are_rate_limited() {
    let (app, _) = app();

    let mut last_location = String::new();
    for _ in 0..11 {
        let response = app
            .clone()
            .oneshot(form_request("/admin/login", "password=wrong"))
            .await
            .unwrap();
        last_location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
    }
    assert_eq!(last_location, "/admin/login?error=rate");
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (app, _) = app();
    let cookie = login(&app).await;

    let response = app
        .oneshot(
            request(Method::POST, "/admin/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}
