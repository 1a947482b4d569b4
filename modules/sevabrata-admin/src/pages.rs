use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::{
    check_password, check_rate_limit, clear_session_cookie, prune_stale_attempts, session_cookie,
    session_secret, AdminSession,
};
use crate::store::{CampaignDraft, StoryDraft};
use crate::templates::*;
use crate::AppState;

const MAX_LOGIN_ATTEMPTS_PER_HOUR: usize = 10;

#[derive(Deserialize)]
pub struct NoticeQuery {
    notice: Option<String>,
}

fn notice_text(code: Option<&str>) -> Option<&'static str> {
    match code {
        Some("saved") => {
            Some("Changes are kept in memory only. Persistence requires a backend API.")
        }
        Some("reloaded") => Some("Content reloaded from the host."),
        Some("missing") => Some("That record no longer exists."),
        _ => None,
    }
}

// --- Auth ---

#[derive(Deserialize)]
pub struct LoginQuery {
    error: Option<String>,
}

pub async fn login_page(Query(params): Query<LoginQuery>) -> impl IntoResponse {
    let error = match params.error.as_deref() {
        Some("bad") => Some("Incorrect password. Please try again."),
        Some("rate") => Some("Too many attempts. Try again later."),
        _ => None,
    };
    Html(render_login(error))
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    password: String,
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(form): Form<LoginForm>,
) -> Response {
    {
        let mut attempts = state.login_attempts.lock().await;
        prune_stale_attempts(&mut attempts, Instant::now());
        let entries = attempts.entry(addr.ip()).or_default();
        if !check_rate_limit(entries, Instant::now(), MAX_LOGIN_ATTEMPTS_PER_HOUR) {
            warn!(ip = %addr.ip(), "Login rate limit hit");
            return Redirect::to("/admin/login?error=rate").into_response();
        }
    }

    if !check_password(&form.password, &state.config.admin_password) {
        warn!(ip = %addr.ip(), "Failed admin login");
        return Redirect::to("/admin/login?error=bad").into_response();
    }

    info!(ip = %addr.ip(), "Admin logged in");
    let cookie = session_cookie(session_secret(&state.config));
    (
        StatusCode::SEE_OTHER,
        [
            (header::SET_COOKIE, cookie),
            (header::LOCATION, "/admin".to_string()),
        ],
    )
        .into_response()
}

pub async fn logout(_session: AdminSession) -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (header::SET_COOKIE, clear_session_cookie()),
            (header::LOCATION, "/admin/login".to_string()),
        ],
    )
        .into_response()
}

// --- Dashboard ---

pub async fn dashboard(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<NoticeQuery>,
) -> impl IntoResponse {
    let counts = state.store.counts().await;
    let total_raised = state.store.total_raised().await;
    Html(render_dashboard(
        &counts,
        total_raised,
        notice_text(params.notice.as_deref()),
    ))
}

/// Refetch everything from the content host, replacing in-memory edits.
pub async fn reload_content(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let (campaigns, stories, counts) = tokio::join!(
        state.content.load_all_campaigns(),
        state.content.load_success_stories(),
        state.content.campaign_counts()
    );
    info!(
        campaigns = campaigns.len(),
        stories = stories.len(),
        "Reloaded content from host"
    );
    state.store.replace_all(campaigns, stories, counts).await;
    Redirect::to("/admin?notice=reloaded")
}

// --- Campaigns ---

pub async fn campaigns_page(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<NoticeQuery>,
) -> impl IntoResponse {
    let campaigns = state.store.campaigns().await;
    Html(render_admin_campaigns(
        &campaigns,
        notice_text(params.notice.as_deref()),
    ))
}

/// Form fields for add/edit campaign. Everything arrives as text; numeric
/// fields that fail to parse are treated as zero, matching how the forms
/// submit empty inputs.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    full_description: String,
    #[serde(default)]
    target_amount: String,
    #[serde(default)]
    raised_amount: String,
    #[serde(default)]
    urgency: String,
    #[serde(default)]
    patient_name: String,
    #[serde(default)]
    patient_age: String,
    #[serde(default)]
    medical_condition: String,
    #[serde(default)]
    hospital: String,
}

impl CampaignForm {
    fn into_draft(self) -> CampaignDraft {
        CampaignDraft {
            title: self.title.trim().to_string(),
            category: opt(&self.category),
            short_description: self.short_description.trim().to_string(),
            full_description: opt(&self.full_description),
            target_amount: parse_amount(&self.target_amount),
            raised_amount: parse_amount(&self.raised_amount),
            urgency: opt(&self.urgency),
            patient_name: opt(&self.patient_name),
            patient_age: self.patient_age.trim().parse().ok(),
            medical_condition: opt(&self.medical_condition),
            hospital: opt(&self.hospital),
        }
    }
}

pub async fn add_campaign(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Form(form): Form<CampaignForm>,
) -> impl IntoResponse {
    let campaign = state.store.add_campaign(form.into_draft()).await;
    info!(
        id = %campaign.id,
        "Would save campaign to campaigns/active/{}.json",
        campaign.id
    );
    Redirect::to("/admin/campaigns?notice=saved")
}

pub async fn edit_campaign_page(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.find_campaign(&id).await {
        Some(campaign) => Html(render_edit_campaign(&campaign)).into_response(),
        None => Redirect::to("/admin/campaigns?notice=missing").into_response(),
    }
}

pub async fn update_campaign(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<CampaignForm>,
) -> impl IntoResponse {
    if state.store.update_campaign(&id, form.into_draft()).await {
        info!(id = %id, "Would save campaign to campaigns/active/{id}.json");
        Redirect::to("/admin/campaigns?notice=saved")
    } else {
        Redirect::to("/admin/campaigns?notice=missing")
    }
}

pub async fn toggle_campaign(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.toggle_campaign_status(&id).await {
        Some(status) => {
            info!(id = %id, status, "Campaign status toggled");
            Redirect::to("/admin/campaigns?notice=saved")
        }
        None => Redirect::to("/admin/campaigns?notice=missing"),
    }
}

pub async fn complete_campaign(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if state.store.complete_campaign(&id).await {
        info!(id = %id, "Would move campaign to campaigns/ended/{id}.json");
        Redirect::to("/admin/campaigns?notice=saved")
    } else {
        Redirect::to("/admin/campaigns?notice=missing")
    }
}

// --- Success stories ---

pub async fn stories_page(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<NoticeQuery>,
) -> impl IntoResponse {
    let stories = state.store.stories().await;
    Html(render_admin_stories(
        &stories,
        notice_text(params.notice.as_deref()),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryForm {
    #[serde(default)]
    patient_name: String,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    treatment: String,
    #[serde(default)]
    hospital: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    amount_raised: String,
    #[serde(default)]
    outcome: String,
    #[serde(default)]
    description: String,
}

impl StoryForm {
    fn into_draft(self) -> StoryDraft {
        StoryDraft {
            patient_name: self.patient_name.trim().to_string(),
            condition: opt(&self.condition),
            treatment: opt(&self.treatment),
            hospital: opt(&self.hospital),
            year: self.year.trim().parse().ok(),
            amount_raised: self.amount_raised.trim().parse().ok(),
            outcome: opt(&self.outcome),
            description: opt(&self.description),
        }
    }
}

pub async fn add_story(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Form(form): Form<StoryForm>,
) -> impl IntoResponse {
    let story = state.store.add_story(form.into_draft()).await;
    info!(
        id = %story.id,
        "Would save story to success-stories/{}.json",
        story.id
    );
    Redirect::to("/admin/stories?notice=saved")
}

pub async fn edit_story_page(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.find_story(&id).await {
        Some(story) => Html(render_edit_story(&story)).into_response(),
        None => Redirect::to("/admin/stories?notice=missing").into_response(),
    }
}

pub async fn update_story(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<StoryForm>,
) -> impl IntoResponse {
    if state.store.update_story(&id, form.into_draft()).await {
        info!(id = %id, "Would save story to success-stories/{id}.json");
        Redirect::to("/admin/stories?notice=saved")
    } else {
        Redirect::to("/admin/stories?notice=missing")
    }
}

pub async fn delete_story(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if state.store.delete_story(&id).await {
        info!(id = %id, "Would delete success-stories/{id}.json");
        Redirect::to("/admin/stories?notice=saved")
    } else {
        Redirect::to("/admin/stories?notice=missing")
    }
}

// --- Field helpers ---

fn opt(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_amount(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_become_none() {
        assert_eq!(opt(""), None);
        assert_eq!(opt("   "), None);
        assert_eq!(opt(" x "), Some("x".to_string()));
    }

    #[test]
    fn unparseable_amounts_are_zero() {
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("abc"), 0);
        assert_eq!(parse_amount(" 50000 "), 50_000);
    }

    #[test]
    fn notice_codes_map_to_text() {
        assert!(notice_text(Some("saved")).unwrap().contains("in memory"));
        assert!(notice_text(Some("bogus")).is_none());
        assert!(notice_text(None).is_none());
    }
}
