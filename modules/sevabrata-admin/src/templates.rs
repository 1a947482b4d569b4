use sevabrata_common::format::{capitalize_first, format_currency_compact, format_date, format_inr};
use sevabrata_common::{Campaign, CampaignCounts, SuccessStory};

/// Render the login page, optionally with an error banner.
pub fn render_login(error: Option<&str>) -> String {
    let error_html = match error {
        Some(e) => format!(r#"<div class="error-banner">{}</div>"#, html_escape(e)),
        None => String::new(),
    };

    let content = format!(
        r#"<div class="container" style="max-width:380px;">
<div class="panel" style="margin-top:48px;">
    <h2 style="margin-bottom:12px;">Admin Login</h2>
    {error_html}
    <form method="post" action="/admin/login">
        <label for="password">Password</label>
        <input type="password" id="password" name="password" autofocus required>
        <button type="submit" class="action-btn" style="margin-top:12px;">Sign In</button>
    </form>
</div>
</div>"#
    );

    build_page("Login", &content, false)
}

/// Render the dashboard: campaign counts and total raised.
pub fn render_dashboard(counts: &CampaignCounts, total_raised: i64, notice: Option<&str>) -> String {
    // The "completed" stat merges the ended and completed directories
    let completed = counts.ended + counts.completed;

    let content = format!(
        r#"<div class="container">
{notice}
<h2 style="margin-bottom:16px;">Dashboard</h2>
<div class="stats-row">
    <div class="stat-card"><div class="stat-value">{total}</div><div class="stat-label">Total Campaigns</div></div>
    <div class="stat-card"><div class="stat-value">{active}</div><div class="stat-label">Active Campaigns</div></div>
    <div class="stat-card"><div class="stat-value">{completed}</div><div class="stat-label">Completed Campaigns</div></div>
    <div class="stat-card"><div class="stat-value">{raised}</div><div class="stat-label">Total Raised</div></div>
</div>
<form method="post" action="/admin/reload">
    <button type="submit" class="action-btn secondary">Reload from content host</button>
</form>
</div>"#,
        notice = notice_banner(notice),
        total = counts.total,
        active = counts.active,
        raised = format_currency_compact(total_raised),
    );

    build_page("Dashboard", &content, true)
}

/// Render the campaign management page: cards plus the add form.
pub fn render_admin_campaigns(campaigns: &[Campaign], notice: Option<&str>) -> String {
    let cards: String = if campaigns.is_empty() {
        r#"<div class="empty-state"><p>No campaigns loaded.</p></div>"#.to_string()
    } else {
        campaigns.iter().map(campaign_admin_card).collect()
    };

    let content = format!(
        r#"<div class="container">
{notice}
<h2 style="margin-bottom:16px;">Campaigns</h2>
<details class="panel">
    <summary>Add Campaign</summary>
    {form}
</details>
{cards}
</div>"#,
        notice = notice_banner(notice),
        form = campaign_form("/admin/campaigns", None),
    );

    build_page("Campaigns", &content, true)
}

/// Render the edit form for one campaign.
pub fn render_edit_campaign(campaign: &Campaign) -> String {
    let content = format!(
        r#"<div class="container">
<a href="/admin/campaigns" class="back-link">&larr; Back to campaigns</a>
<div class="panel" style="margin-top:12px;">
    <h2>Edit Campaign</h2>
    {form}
</div>
</div>"#,
        form = campaign_form(&format!("/admin/campaigns/{}", campaign.id), Some(campaign)),
    );

    build_page("Edit Campaign", &content, true)
}

fn campaign_admin_card(c: &Campaign) -> String {
    let percent = c.progress_percent();
    let status = if c.status.is_empty() { "active" } else { &c.status };
    let toggle_label = if status == "active" { "Pause" } else { "Resume" };

    let patient_block = if c.patient_name.is_some() || c.medical_condition.is_some() {
        let mut lines = String::new();
        if let Some(name) = &c.patient_name {
            lines.push_str(&format!("<strong>Patient:</strong> {}", html_escape(name)));
            if let Some(age) = c.patient_age {
                lines.push_str(&format!(" (Age: {age})"));
            }
        }
        if let Some(condition) = &c.medical_condition {
            lines.push_str(&format!(
                "<br><strong>Condition:</strong> {}",
                html_escape(condition)
            ));
        }
        if let Some(hospital) = &c.hospital {
            lines.push_str(&format!(
                "<br><strong>Hospital:</strong> {}",
                html_escape(hospital)
            ));
        }
        format!(r#"<div class="patient-block">{lines}</div>"#)
    } else {
        String::new()
    };

    format!(
        r#"<div class="campaign-card">
    <h3>{title} <span class="status-badge {status}">{status_label}</span></h3>
    <p class="summary">{description}</p>
    <div class="progress-bar"><div class="progress-fill" style="width:{width}%"></div></div>
    <div class="progress-text"><span>₹{raised} / ₹{target}</span><span>{percent}%</span></div>
    {patient_block}
    <div class="meta-line"><strong>Last Updated:</strong> {updated}{category}{urgency}</div>
    <div class="card-actions">
        <a href="/admin/campaigns/{id}/edit" class="action-btn secondary">Edit</a>
        <form method="post" action="/admin/campaigns/{id}/toggle"><button type="submit" class="action-btn secondary">{toggle_label}</button></form>
        <form method="post" action="/admin/campaigns/{id}/complete"><button type="submit" class="action-btn">Complete</button></form>
    </div>
</div>"#,
        id = html_escape(&c.id),
        title = html_escape(&c.title),
        status = html_escape(status),
        status_label = html_escape(&capitalize_first(status)),
        description = html_escape(&c.description),
        width = percent.min(100),
        raised = format_inr(c.raised_amount),
        target = format_inr(c.target_amount),
        updated = html_escape(&format_date(c.last_updated.as_deref())),
        category = c
            .category
            .as_deref()
            .map(|cat| format!("<br><strong>Category:</strong> {}", html_escape(cat)))
            .unwrap_or_default(),
        urgency = c
            .urgency
            .as_deref()
            .map(|u| format!("<br><strong>Urgency:</strong> {}", html_escape(u)))
            .unwrap_or_default(),
    )
}

fn campaign_form(action: &str, existing: Option<&Campaign>) -> String {
    let get = |f: fn(&Campaign) -> String| existing.map(f).unwrap_or_default();
    let title = get(|c| c.title.clone());
    let category = get(|c| c.category.clone().unwrap_or_default());
    let short_description = get(|c| c.description.clone());
    let full_description = get(|c| c.full_description.clone().unwrap_or_default());
    let target = get(|c| c.target_amount.to_string());
    let raised = get(|c| c.raised_amount.to_string());
    let urgency = get(|c| c.urgency.clone().unwrap_or_default());
    let patient_name = get(|c| c.patient_name.clone().unwrap_or_default());
    let patient_age = get(|c| c.patient_age.map(|a| a.to_string()).unwrap_or_default());
    let condition = get(|c| c.medical_condition.clone().unwrap_or_default());
    let hospital = get(|c| c.hospital.clone().unwrap_or_default());
    let submit_label = if existing.is_some() { "Update Campaign" } else { "Create Campaign" };

    format!(
        r#"<form method="post" action="{action}" class="stacked-form">
    <label>Title <input name="title" value="{title}" required></label>
    <label>Category <input name="category" value="{category}"></label>
    <label>Short Description <input name="shortDescription" value="{short_description}" required></label>
    <label>Full Description <textarea name="fullDescription" rows="4">{full_description}</textarea></label>
    <label>Target Amount (₹) <input name="targetAmount" value="{target}" required></label>
    <label>Raised Amount (₹) <input name="raisedAmount" value="{raised}"></label>
    <label>Urgency
        <select name="urgency">
            <option value=""{none_sel}>Normal</option>
            <option value="medium"{medium_sel}>Medium</option>
            <option value="high"{high_sel}>High</option>
        </select>
    </label>
    <label>Patient Name <input name="patientName" value="{patient_name}"></label>
    <label>Patient Age <input name="patientAge" value="{patient_age}"></label>
    <label>Medical Condition <input name="medicalCondition" value="{condition}"></label>
    <label>Hospital <input name="hospital" value="{hospital}"></label>
    <button type="submit" class="action-btn">{submit_label}</button>
</form>"#,
        action = html_escape(action),
        title = html_escape(&title),
        category = html_escape(&category),
        short_description = html_escape(&short_description),
        full_description = html_escape(&full_description),
        patient_name = html_escape(&patient_name),
        condition = html_escape(&condition),
        hospital = html_escape(&hospital),
        none_sel = if urgency.is_empty() { " selected" } else { "" },
        medium_sel = if urgency == "medium" { " selected" } else { "" },
        high_sel = if urgency == "high" { " selected" } else { "" },
    )
}

/// Render the story management page: cards plus the add form.
pub fn render_admin_stories(stories: &[SuccessStory], notice: Option<&str>) -> String {
    let cards: String = if stories.is_empty() {
        r#"<div class="empty-state"><p>No success stories loaded.</p></div>"#.to_string()
    } else {
        stories.iter().map(story_admin_card).collect()
    };

    let content = format!(
        r#"<div class="container">
{notice}
<h2 style="margin-bottom:16px;">Success Stories</h2>
<details class="panel">
    <summary>Add Success Story</summary>
    {form}
</details>
{cards}
</div>"#,
        notice = notice_banner(notice),
        form = story_form("/admin/stories", None),
    );

    build_page("Success Stories", &content, true)
}

/// Render the edit form for one story.
pub fn render_edit_story(story: &SuccessStory) -> String {
    let content = format!(
        r#"<div class="container">
<a href="/admin/stories" class="back-link">&larr; Back to stories</a>
<div class="panel" style="margin-top:12px;">
    <h2>Edit Success Story</h2>
    {form}
</div>
</div>"#,
        form = story_form(&format!("/admin/stories/{}", story.id), Some(story)),
    );

    build_page("Edit Story", &content, true)
}

fn story_admin_card(s: &SuccessStory) -> String {
    format!(
        r#"<div class="campaign-card">
    <h3>{name}</h3>
    <div class="meta-line">
        <strong>Condition:</strong> {condition}<br>
        <strong>Treatment:</strong> {treatment}<br>
        <strong>Year:</strong> {year}<br>
        <strong>Amount Raised:</strong> {amount}
    </div>
    <div class="card-actions">
        <a href="/admin/stories/{id}/edit" class="action-btn secondary">Edit</a>
        <form method="post" action="/admin/stories/{id}/delete"><button type="submit" class="action-btn danger">Delete</button></form>
    </div>
</div>"#,
        id = html_escape(&s.id),
        name = html_escape(&s.patient_name),
        condition = html_escape(s.condition.as_deref().unwrap_or("N/A")),
        treatment = html_escape(s.treatment.as_deref().unwrap_or("N/A")),
        year = s.year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string()),
        amount = s
            .amount_raised
            .map(|a| format!("₹{}", format_inr(a)))
            .unwrap_or_else(|| "Not specified".to_string()),
    )
}

fn story_form(action: &str, existing: Option<&SuccessStory>) -> String {
    let get = |f: fn(&SuccessStory) -> String| existing.map(f).unwrap_or_default();
    let patient_name = get(|s| s.patient_name.clone());
    let condition = get(|s| s.condition.clone().unwrap_or_default());
    let treatment = get(|s| s.treatment.clone().unwrap_or_default());
    let hospital = get(|s| s.hospital.clone().unwrap_or_default());
    let year = get(|s| s.year.map(|y| y.to_string()).unwrap_or_default());
    let amount = get(|s| s.amount_raised.map(|a| a.to_string()).unwrap_or_default());
    let outcome = get(|s| s.outcome.clone().unwrap_or_default());
    let description = get(|s| s.description.clone().unwrap_or_default());
    let submit_label = if existing.is_some() { "Update Story" } else { "Create Story" };

    format!(
        r#"<form method="post" action="{action}" class="stacked-form">
    <label>Patient Name <input name="patientName" value="{patient_name}" required></label>
    <label>Condition <input name="condition" value="{condition}"></label>
    <label>Treatment <input name="treatment" value="{treatment}"></label>
    <label>Hospital <input name="hospital" value="{hospital}"></label>
    <label>Year <input name="year" value="{year}"></label>
    <label>Amount Raised (₹) <input name="amountRaised" value="{amount}"></label>
    <label>Outcome <input name="outcome" value="{outcome}"></label>
    <label>Description <textarea name="description" rows="4">{description}</textarea></label>
    <button type="submit" class="action-btn">{submit_label}</button>
</form>"#,
        action = html_escape(action),
        patient_name = html_escape(&patient_name),
        condition = html_escape(&condition),
        treatment = html_escape(&treatment),
        hospital = html_escape(&hospital),
        outcome = html_escape(&outcome),
        description = html_escape(&description),
    )
}

// --- Helpers ---

fn notice_banner(notice: Option<&str>) -> String {
    match notice {
        Some(n) => format!(r#"<div class="notice-banner">{}</div>"#, html_escape(n)),
        None => String::new(),
    }
}

fn build_page(title: &str, content: &str, with_nav: bool) -> String {
    let nav = if with_nav {
        r#"<nav><a href="/admin">Dashboard</a><a href="/admin/campaigns">Campaigns</a><a href="/admin/stories">Stories</a><form method="post" action="/admin/logout" style="display:inline;"><button type="submit" class="link-btn">Logout</button></form></nav>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Sevabrata Admin</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#f4f4f4;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:600;}}
.header nav a{{color:#ccc;text-decoration:none;margin-left:20px;font-size:14px;}}
.header nav a:hover{{color:#fff;}}
.link-btn{{background:none;border:none;color:#ccc;font-size:14px;margin-left:20px;cursor:pointer;}}
.container{{max-width:860px;margin:0 auto;padding:24px;}}
.panel{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:16px;}}
.panel summary{{cursor:pointer;font-weight:600;font-size:14px;}}
.stats-row{{display:grid;grid-template-columns:repeat(4,1fr);gap:16px;margin-bottom:24px;}}
.stat-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;text-align:center;}}
.stat-value{{font-size:28px;font-weight:700;color:#166534;}}
.stat-label{{font-size:12px;color:#888;}}
.campaign-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.summary{{color:#555;font-size:14px;margin:8px 0;}}
.progress-bar{{background:#eee;border-radius:6px;height:10px;overflow:hidden;margin:8px 0 4px;}}
.progress-fill{{background:#2e7d32;height:100%;}}
.progress-text{{display:flex;justify-content:space-between;font-size:12px;color:#666;}}
.status-badge{{padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;text-transform:uppercase;margin-left:6px;}}
.status-badge.active{{background:#e8f5e9;color:#2e7d32;}}
.status-badge.paused{{background:#fff3e0;color:#e65100;}}
.status-badge.completed,.status-badge.ended{{background:#e3f2fd;color:#1565c0;}}
.status-badge.archived{{background:#f0f0f0;color:#555;}}
.patient-block{{margin:12px 0;font-size:13px;color:#666;}}
.meta-line{{font-size:13px;color:#666;margin:8px 0;}}
.card-actions{{display:flex;gap:8px;margin-top:12px;align-items:center;}}
.card-actions form{{display:inline;}}
.action-btn{{display:inline-block;padding:6px 16px;background:#166534;color:#fff;border:none;border-radius:4px;text-decoration:none;font-size:13px;font-weight:500;cursor:pointer;}}
.action-btn.secondary{{background:#fff;color:#166534;border:1px solid #166534;}}
.action-btn.danger{{background:#c62828;}}
.back-link{{font-size:13px;color:#166534;text-decoration:none;}}
.stacked-form label{{display:block;font-size:13px;color:#555;margin-top:10px;}}
.stacked-form input,.stacked-form textarea,.stacked-form select{{width:100%;padding:6px 8px;border:1px solid #ccc;border-radius:4px;font-size:14px;margin-top:2px;}}
.stacked-form button{{margin-top:14px;}}
.error-banner{{background:#fce4ec;border:1px solid #f8bbd0;color:#c62828;padding:8px 12px;border-radius:4px;font-size:13px;margin-bottom:12px;}}
.notice-banner{{background:#fff8e1;border:1px solid #ffecb3;color:#795548;padding:8px 12px;border-radius:4px;font-size:13px;margin-bottom:12px;}}
.empty-state{{color:#888;text-align:center;padding:40px;}}
</style>
</head>
<body>
<div class="header">
    <h1>Sevabrata Admin</h1>
    {nav}
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_render_placeholder_once() {
        let html = render_admin_campaigns(&[], None);
        assert_eq!(html.matches("No campaigns loaded.").count(), 1);

        let html = render_admin_stories(&[], None);
        assert_eq!(html.matches("No success stories loaded.").count(), 1);
    }

    #[test]
    fn status_badge_follows_the_record() {
        let c = Campaign {
            id: "c".into(),
            title: "T".into(),
            status: "paused".into(),
            target_amount: 1,
            ..Default::default()
        };
        let html = render_admin_campaigns(&[c], None);
        assert!(html.contains("Paused"));
        assert!(html.contains("Resume"));
    }

    #[test]
    fn dashboard_merges_ended_and_completed() {
        let counts = CampaignCounts {
            active: 3,
            completed: 2,
            ended: 4,
            archived: 1,
            total: 10,
        };
        let html = render_dashboard(&counts, 1_500_000, None);
        // completed stat = ended + completed
        assert!(html.contains(r#"<div class="stat-value">6</div>"#));
        assert!(html.contains("₹15.0L"));
    }

    #[test]
    fn login_error_is_escaped() {
        let html = render_login(Some("<bad>"));
        assert!(html.contains("&lt;bad&gt;"));
        assert!(!html.contains("<bad>"));
    }
}
