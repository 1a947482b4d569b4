//! Public Sevabrata Foundation site: fetches content JSON from the static
//! host and renders the showcase pages server-side. Every page is rebuilt
//! from the records on each request; loader failures degrade to the empty
//! state rather than an error page.

pub mod reports;
pub mod templates;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

use sevabrata_common::format::{format_date, format_inr};
use sevabrata_common::{AnnualReport, Campaign, NewsArticle, SuccessStory};
use sevabrata_content::ContentClient;

use templates::*;

pub struct AppState {
    pub content: ContentClient,
    pub content_base_url: String,
    pub reports: Vec<AnnualReport>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/campaigns", get(campaigns_page))
        .route("/campaigns/{id}", get(campaign_detail_page))
        .route("/stories", get(stories_page))
        .route("/stories/{id}", get(story_detail_page))
        .route("/news", get(news_page))
        .route("/reports", get(reports_page))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
        .layer(CompressionLayer::new())
        // Content changes between admin sessions; never let browsers cache it
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

// --- Handlers ---

async fn home_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (stats, campaigns) = tokio::join!(
        state.content.load_stats(),
        state.content.load_campaigns(sevabrata_common::CampaignPhase::Active)
    );
    let views: Vec<CampaignView> = campaigns
        .iter()
        .map(|c| campaign_to_view(c, false, &state.content_base_url))
        .collect();
    Html(render_home(&stats, &views))
}

#[derive(Deserialize)]
struct CampaignsQuery {
    tab: Option<String>,
}

async fn campaigns_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CampaignsQuery>,
) -> impl IntoResponse {
    let tab = match params.tab.as_deref() {
        Some("completed") => CampaignTab::Completed,
        _ => CampaignTab::Active,
    };

    let campaigns = match tab {
        CampaignTab::Active => {
            state
                .content
                .load_campaigns(sevabrata_common::CampaignPhase::Active)
                .await
        }
        CampaignTab::Completed => state.content.load_completed_campaigns().await,
    };

    let completed_view = tab == CampaignTab::Completed;
    let views: Vec<CampaignView> = campaigns
        .iter()
        .map(|c| campaign_to_view(c, completed_view, &state.content_base_url))
        .collect();
    Html(render_campaigns(&views, tab))
}

async fn campaign_detail_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.content.fetch_campaign(&id).await {
        Some(campaign) => {
            let completed = campaign.status == "completed" || campaign.status == "ended";
            let view = campaign_to_view(&campaign, completed, &state.content_base_url);
            (
                StatusCode::OK,
                Html(render_campaign_detail(&view, &campaign.timeline)),
            )
        }
        None => {
            warn!(id, "Campaign not found");
            (StatusCode::NOT_FOUND, Html(render_not_found("Campaign")))
        }
    }
}

async fn stories_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stories = state.content.load_success_stories().await;
    let views: Vec<StoryView> = stories
        .iter()
        .map(|s| story_to_view(s, &state.content_base_url))
        .collect();
    Html(render_stories(&views))
}

async fn story_detail_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.content.fetch_success_story(&id).await {
        Some(story) => {
            let view = story_to_view(&story, &state.content_base_url);
            (StatusCode::OK, Html(render_story_detail(&view)))
        }
        None => (StatusCode::NOT_FOUND, Html(render_not_found("Story"))),
    }
}

async fn news_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let articles = state.content.load_news().await;
    let views: Vec<NewsView> = articles
        .iter()
        .map(|a| news_to_view(a, &state.content_base_url))
        .collect();
    Html(render_news(&views))
}

async fn reports_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(render_reports(&state.reports, &state.content_base_url))
}

// --- View models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignTab {
    Active,
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub full_description: Option<String>,
    pub image_url: Option<String>,
    pub progress_percent: i64,
    pub progress_width: i64,
    pub raised_fmt: String,
    pub target_fmt: String,
    pub needed_fmt: String,
    pub urgent: bool,
    pub completed: bool,
    pub goal_exceeded: bool,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub medical_condition: Option<String>,
    pub hospital: Option<String>,
    pub last_updated_fmt: String,
}

#[derive(Debug, Clone, Default)]
pub struct StoryView {
    pub id: String,
    pub patient_name: String,
    pub subtitle: String,
    pub excerpt: String,
    pub description: Option<String>,
    pub amount_fmt: Option<String>,
    pub condition: Option<String>,
    pub treatment: Option<String>,
    pub hospital: Option<String>,
    pub year: Option<i32>,
    pub outcome: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewsView {
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,
    pub date_fmt: String,
    pub source: String,
}

/// Resolve a record's image reference against the content host. Absolute
/// URLs pass through; relative paths are asset paths on the host.
fn asset_url(content_base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{content_base_url}/{path}")
    }
}

pub fn campaign_to_view(c: &Campaign, completed_view: bool, content_base_url: &str) -> CampaignView {
    let percent = c.progress_percent();
    CampaignView {
        id: c.id.clone(),
        title: c.title.clone(),
        description: c.description.clone(),
        full_description: c.full_description.clone(),
        image_url: c.image.as_deref().map(|p| asset_url(content_base_url, p)),
        progress_percent: percent,
        progress_width: percent.min(100),
        raised_fmt: format_inr(c.raised_amount),
        target_fmt: format_inr(c.target_amount),
        needed_fmt: format_inr(c.amount_needed()),
        urgent: c.urgency.as_deref() == Some("high") && !completed_view,
        completed: completed_view,
        goal_exceeded: percent >= 100,
        patient_name: c.patient_name.clone(),
        patient_age: c.patient_age,
        medical_condition: c.medical_condition.clone(),
        hospital: c.hospital.clone(),
        last_updated_fmt: format_date(c.last_updated.as_deref()),
    }
}

pub fn story_to_view(s: &SuccessStory, content_base_url: &str) -> StoryView {
    let subtitle = match (&s.treatment, s.year) {
        (Some(t), Some(y)) => format!("{t} - {y}"),
        (Some(t), None) => t.clone(),
        (None, Some(y)) => y.to_string(),
        (None, None) => String::new(),
    };

    let description = s.description.clone();
    let excerpt = match &description {
        Some(d) if d.chars().count() > 150 => {
            let truncated: String = d.chars().take(150).collect();
            format!("{truncated}...")
        }
        Some(d) => d.clone(),
        None => String::new(),
    };

    StoryView {
        id: s.id.clone(),
        patient_name: s.patient_name.clone(),
        subtitle,
        excerpt,
        description,
        amount_fmt: s.amount_raised.map(format_inr),
        condition: s.condition.clone(),
        treatment: s.treatment.clone(),
        hospital: s.hospital.clone(),
        year: s.year,
        outcome: s.outcome.clone(),
        image_url: s.image.as_deref().map(|p| asset_url(content_base_url, p)),
    }
}

pub fn news_to_view(a: &NewsArticle, content_base_url: &str) -> NewsView {
    NewsView {
        title: a.title.clone(),
        summary: a.summary.clone().unwrap_or_default(),
        image_url: a.image.as_deref().map(|p| asset_url(content_base_url, p)),
        date_fmt: format_date(a.published_date.as_deref()),
        source: a
            .source
            .clone()
            .unwrap_or_else(|| "Sevabrata Foundation".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_clamps_width_but_reports_true_percent() {
        let c = Campaign {
            id: "c".into(),
            title: "T".into(),
            target_amount: 100_000,
            raised_amount: 130_000,
            ..Default::default()
        };
        let view = campaign_to_view(&c, true, "http://content");
        assert_eq!(view.progress_percent, 130);
        assert_eq!(view.progress_width, 100);
        assert!(view.goal_exceeded);
        assert_eq!(view.needed_fmt, "0");
    }

    #[test]
    fn urgency_badge_suppressed_on_completed_view() {
        let c = Campaign {
            id: "c".into(),
            title: "T".into(),
            urgency: Some("high".into()),
            target_amount: 1,
            ..Default::default()
        };
        assert!(campaign_to_view(&c, false, "http://content").urgent);
        assert!(!campaign_to_view(&c, true, "http://content").urgent);
    }

    #[test]
    fn story_excerpt_truncates_long_descriptions() {
        let s = SuccessStory {
            id: "s".into(),
            patient_name: "P".into(),
            treatment: Some("Heart surgery".into()),
            year: Some(2019),
            description: Some("x".repeat(200)),
            ..Default::default()
        };
        let view = story_to_view(&s, "http://content");
        assert_eq!(view.subtitle, "Heart surgery - 2019");
        assert_eq!(view.excerpt.chars().count(), 153);
        assert!(view.excerpt.ends_with("..."));
    }

    #[test]
    fn news_source_falls_back_to_foundation() {
        let a = NewsArticle {
            id: "n".into(),
            title: "T".into(),
            ..Default::default()
        };
        let view = news_to_view(&a, "http://content");
        assert_eq!(view.source, "Sevabrata Foundation");
        assert_eq!(view.date_fmt, "Date not available");
    }

    #[test]
    fn relative_images_resolve_against_content_host() {
        let a = NewsArticle {
            id: "n".into(),
            title: "T".into(),
            image: Some("assets/pic.jpg".into()),
            ..Default::default()
        };
        let view = news_to_view(&a, "http://content:8000");
        assert_eq!(view.image_url.as_deref(), Some("http://content:8000/assets/pic.jpg"));
    }
}
