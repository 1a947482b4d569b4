use sevabrata_common::format::format_date;
use sevabrata_common::{AnnualReport, CampaignStats, TimelineEntry};

use crate::{CampaignTab, CampaignView, NewsView, StoryView};

/// Render the home page: hero, foundation stats, active campaigns.
pub fn render_home(stats: &CampaignStats, campaigns: &[CampaignView]) -> String {
    let stat_cards = format!(
        r#"<div class="stats-row">
    <div class="stat-card"><div class="stat-value">{lives}</div><div class="stat-label">Lives Impacted</div></div>
    <div class="stat-card"><div class="stat-value">₹{raised}</div><div class="stat-label">Raised for Treatments</div></div>
    <div class="stat-card"><div class="stat-value">{active}</div><div class="stat-label">Active Campaigns</div></div>
    <div class="stat-card"><div class="stat-value">{rate:.0}%</div><div class="stat-label">Success Rate</div></div>
</div>"#,
        lives = stats.lives_impacted,
        raised = sevabrata_common::format::format_inr(stats.total_amount_raised),
        active = stats.active_campaigns,
        rate = stats.success_rate,
    );

    let content = format!(
        r#"<div class="hero">
    <h2>Every life deserves a fighting chance</h2>
    <p>Sevabrata Foundation connects donors with patients who cannot afford critical medical treatment.</p>
    <a href="/campaigns" class="action-btn">See Active Campaigns</a>
</div>
<div class="container">
{stat_cards}
<h2 style="margin:24px 0 16px;">Active Campaigns</h2>
{cards}
</div>"#,
        cards = campaign_cards(campaigns, CampaignTab::Active),
    );

    build_page("Home", &content)
}

/// Render the campaigns page with its active/completed tabs.
pub fn render_campaigns(campaigns: &[CampaignView], tab: CampaignTab) -> String {
    let (active_class, completed_class) = match tab {
        CampaignTab::Active => ("tab active", "tab"),
        CampaignTab::Completed => ("tab", "tab active"),
    };

    let content = format!(
        r#"<div class="container">
<h2 style="margin-bottom:16px;">Medical Campaigns</h2>
<div class="tabs">
    <a href="/campaigns?tab=active" class="{active_class}">Active</a>
    <a href="/campaigns?tab=completed" class="{completed_class}">Completed</a>
</div>
{cards}
</div>"#,
        cards = campaign_cards(campaigns, tab),
    );

    build_page("Campaigns", &content)
}

fn campaign_cards(campaigns: &[CampaignView], tab: CampaignTab) -> String {
    if campaigns.is_empty() {
        let message = match tab {
            CampaignTab::Active => "No active campaigns found.",
            CampaignTab::Completed => "No completed campaigns found.",
        };
        return format!(r#"<div class="no-campaigns"><p>{message}</p></div>"#);
    }

    let mut cards = String::new();
    for c in campaigns {
        let urgent_class = if c.urgent { " urgent" } else { "" };
        let badge = if c.completed {
            let (cls, label) = if c.goal_exceeded {
                ("success-badge goal-exceeded", "Goal Exceeded")
            } else {
                ("success-badge", "Completed")
            };
            format!(r#"<span class="{cls}">{label}</span>"#)
        } else if c.urgent {
            r#"<span class="urgent-badge">Urgent</span>"#.to_string()
        } else {
            String::new()
        };

        let progress_text = if c.completed {
            format!(
                r#"<div class="progress-text"><span>₹{raised} raised of ₹{target}</span><span>{pct}%</span></div>"#,
                raised = c.raised_fmt,
                target = c.target_fmt,
                pct = c.progress_percent,
            )
        } else {
            format!(
                r#"<div class="progress-text"><span>₹{raised} raised</span><span>{pct}%</span></div>
<div class="progress-text"><span>Goal: ₹{target}</span><span>₹{needed} needed</span></div>"#,
                raised = c.raised_fmt,
                target = c.target_fmt,
                needed = c.needed_fmt,
                pct = c.progress_percent,
            )
        };

        let mut stats = String::new();
        if let Some(condition) = &c.medical_condition {
            stats.push_str(&format!(r#"<span class="stat">{}</span>"#, html_escape(condition)));
        }
        if let Some(age) = c.patient_age {
            stats.push_str(&format!(r#"<span class="stat">Age {age}</span>"#));
        }

        let updated_label = if c.completed { "Completed:" } else { "Last updated:" };

        cards.push_str(&format!(
            r#"<div class="campaign-card{urgent_class}">
    {image}<div>{badge}</div>
    <h3><a href="/campaigns/{id}">{title}</a></h3>
    <p class="summary">{description}</p>
    <div class="progress-bar"><div class="progress-fill" style="width:{width}%"></div></div>
    {progress_text}
    <div class="meta-row">{stats}</div>
    <div class="campaign-actions">
        <a href="/campaigns/{id}" class="action-btn secondary">View Details</a>
        {donate}
    </div>
    <small class="updated">{updated_label} {updated}</small>
</div>"#,
            id = html_escape(&c.id),
            title = html_escape(&c.title),
            description = html_escape(&c.description),
            image = image_tag(c.image_url.as_deref(), &c.title),
            width = c.progress_width,
            donate = if c.completed {
                String::new()
            } else {
                r#"<a href="/#contribute" class="action-btn">Donate Now</a>"#.to_string()
            },
            updated = html_escape(&c.last_updated_fmt),
        ));
    }
    cards
}

/// Render one campaign's detail page, timeline included.
pub fn render_campaign_detail(c: &CampaignView, timeline: &[TimelineEntry]) -> String {
    let patient_block = if c.patient_name.is_some()
        || c.patient_age.is_some()
        || c.medical_condition.is_some()
        || c.hospital.is_some()
    {
        let mut rows = String::new();
        if let Some(name) = &c.patient_name {
            rows.push_str(&format!("<dt>Patient</dt><dd>{}</dd>", html_escape(name)));
        }
        if let Some(age) = c.patient_age {
            rows.push_str(&format!("<dt>Age</dt><dd>{age}</dd>"));
        }
        if let Some(condition) = &c.medical_condition {
            rows.push_str(&format!("<dt>Condition</dt><dd>{}</dd>", html_escape(condition)));
        }
        if let Some(hospital) = &c.hospital {
            rows.push_str(&format!("<dt>Hospital</dt><dd>{}</dd>", html_escape(hospital)));
        }
        format!(r#"<dl class="detail-meta">{rows}</dl>"#)
    } else {
        String::new()
    };

    let timeline_html = if timeline.is_empty() {
        String::new()
    } else {
        let items: String = timeline
            .iter()
            .map(|item| {
                let description = match &item.description {
                    Some(d) => format!(
                        r#"<div class="timeline-description">{}</div>"#,
                        html_escape(d)
                    ),
                    None => String::new(),
                };
                format!(
                    r#"<div class="timeline-item">
    <div class="timeline-date">{date}</div>
    <div class="timeline-content"><div class="timeline-event">{event}</div>{description}</div>
</div>"#,
                    date = html_escape(&format_date(Some(&item.date))),
                    event = html_escape(&item.event),
                )
            })
            .collect();
        format!(r#"<div class="campaign-timeline"><h3>Campaign Timeline</h3>{items}</div>"#)
    };

    let description = c
        .full_description
        .as_deref()
        .unwrap_or(&c.description);

    let content = format!(
        r#"<div class="container">
<a href="/campaigns" class="back-link">&larr; Back to campaigns</a>
<div class="campaign-card" style="margin-top:12px;">
    <h2>{title}</h2>
    <p class="summary">{description}</p>
    <div class="progress-bar"><div class="progress-fill" style="width:{width}%"></div></div>
    <div class="progress-text"><span>₹{raised} raised of ₹{target}</span><span>{pct}%</span></div>
    {patient_block}
    {timeline_html}
</div>
</div>"#,
        title = html_escape(&c.title),
        description = html_escape(description),
        width = c.progress_width,
        raised = c.raised_fmt,
        target = c.target_fmt,
        pct = c.progress_percent,
    );

    build_page(&c.title, &content)
}

/// Render the success stories page.
pub fn render_stories(stories: &[StoryView]) -> String {
    let cards = if stories.is_empty() {
        r#"<div class="no-stories"><p>No success stories available at this time.</p></div>"#
            .to_string()
    } else {
        stories
            .iter()
            .map(|s| {
                format!(
                    r#"<div class="story-card">
    <h3><a href="/stories/{id}">{name}</a></h3>
    <p class="story-subtitle">{subtitle}</p>
    <p>{excerpt}</p>
    <div class="meta-row">{amount}</div>
</div>"#,
                    id = html_escape(&s.id),
                    name = html_escape(&s.patient_name),
                    subtitle = html_escape(&s.subtitle),
                    excerpt = html_escape(&s.excerpt),
                    amount = match &s.amount_fmt {
                        Some(a) => format!(r#"<span class="stat">₹{a}</span>"#),
                        None => r#"<span class="stat">Amount not specified</span>"#.to_string(),
                    },
                )
            })
            .collect()
    };

    let content =
        format!(r#"<div class="container"><h2 style="margin-bottom:16px;">Success Stories</h2>{cards}</div>"#);
    build_page("Success Stories", &content)
}

/// Render one success story's detail page.
pub fn render_story_detail(s: &StoryView) -> String {
    let mut rows = String::new();
    if let Some(condition) = &s.condition {
        rows.push_str(&format!("<dt>Condition</dt><dd>{}</dd>", html_escape(condition)));
    }
    if let Some(treatment) = &s.treatment {
        rows.push_str(&format!("<dt>Treatment</dt><dd>{}</dd>", html_escape(treatment)));
    }
    if let Some(hospital) = &s.hospital {
        rows.push_str(&format!("<dt>Hospital</dt><dd>{}</dd>", html_escape(hospital)));
    }
    if let Some(year) = s.year {
        rows.push_str(&format!("<dt>Year</dt><dd>{year}</dd>"));
    }
    if let Some(amount) = &s.amount_fmt {
        rows.push_str(&format!("<dt>Amount Raised</dt><dd>₹{amount}</dd>"));
    }

    let outcome = match &s.outcome {
        Some(o) => format!(
            r#"<div class="outcome-banner">{}</div>"#,
            html_escape(o)
        ),
        None => String::new(),
    };

    let content = format!(
        r#"<div class="container">
<a href="/stories" class="back-link">&larr; Back to stories</a>
<div class="story-card" style="margin-top:12px;">
    <h2>{name}</h2>
    <p class="story-subtitle">{subtitle}</p>
    {outcome}
    <p>{description}</p>
    <dl class="detail-meta">{rows}</dl>
</div>
</div>"#,
        name = html_escape(&s.patient_name),
        subtitle = html_escape(&s.subtitle),
        description = html_escape(s.description.as_deref().unwrap_or("")),
    );

    build_page(&s.patient_name, &content)
}

/// Render the news page.
pub fn render_news(articles: &[NewsView]) -> String {
    let cards = if articles.is_empty() {
        r#"<div class="no-news"><p>No news articles available at this time.</p></div>"#.to_string()
    } else {
        articles
            .iter()
            .map(|a| {
                format!(
                    r#"<div class="news-card">
    {image}<h3>{title}</h3>
    <p>{summary}</p>
    <div class="meta-row"><span class="news-date">{date}</span><span class="news-source">{source}</span></div>
</div>"#,
                    title = html_escape(&a.title),
                    image = image_tag(a.image_url.as_deref(), &a.title),
                    summary = html_escape(&a.summary),
                    date = html_escape(&a.date_fmt),
                    source = html_escape(&a.source),
                )
            })
            .collect()
    };

    let content = format!(
        r#"<div class="container"><h2 style="margin-bottom:16px;">News &amp; Updates</h2>{cards}</div>"#
    );
    build_page("News", &content)
}

/// Render the annual reports page.
pub fn render_reports(reports: &[AnnualReport], content_base_url: &str) -> String {
    let cards = if reports.is_empty() {
        r#"<div class="no-reports"><p>No annual reports available at this time.</p></div>"#
            .to_string()
    } else {
        reports
            .iter()
            .map(|r| {
                let highlights: String = r
                    .highlights
                    .iter()
                    .map(|h| format!("<li>{}</li>", html_escape(h)))
                    .collect();
                format!(
                    r#"<div class="report-card">
    <h3>{title}</h3>
    <p>{description}</p>
    <ul class="highlights">{highlights}</ul>
    <div class="meta-row"><span class="stat">{pages} pages</span><span class="stat">{size}</span></div>
    <div class="campaign-actions">
        <a href="{url}" class="action-btn" download="{file_name}">Download</a>
        <a href="{url}" class="action-btn secondary" target="_blank" rel="noopener">Preview</a>
    </div>
</div>"#,
                    title = html_escape(&r.title),
                    description = html_escape(&r.description),
                    pages = r.pages,
                    size = html_escape(&r.file_size),
                    url = html_escape(&format!("{content_base_url}/{}", r.file_path)),
                    file_name = html_escape(&r.file_name),
                )
            })
            .collect()
    };

    let content = format!(
        r#"<div class="container"><h2 style="margin-bottom:16px;">Annual Reports</h2>{cards}</div>"#
    );
    build_page("Annual Reports", &content)
}

/// Render a friendly 404 page.
pub fn render_not_found(what: &str) -> String {
    let content = format!(
        r#"<div class="container"><div class="no-campaigns"><p>{} not found.</p></div></div>"#,
        html_escape(what)
    );
    build_page("Not Found", &content)
}

// --- Helpers ---

fn image_tag(url: Option<&str>, alt: &str) -> String {
    match url {
        Some(u) => format!(
            r#"<img src="{}" alt="{}" class="card-image">"#,
            html_escape(u),
            html_escape(alt)
        ),
        None => String::new(),
    }
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Sevabrata Foundation</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#14532d;color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:600;}}
.header nav a{{color:#d1e7dd;text-decoration:none;margin-left:20px;font-size:14px;}}
.header nav a:hover{{color:#fff;}}
.hero{{background:#166534;color:#fff;text-align:center;padding:56px 24px;}}
.hero h2{{font-size:28px;margin-bottom:8px;}}
.hero p{{color:#d1e7dd;margin-bottom:20px;}}
.container{{max-width:960px;margin:0 auto;padding:24px;}}
.stats-row{{display:grid;grid-template-columns:repeat(4,1fr);gap:16px;margin:24px 0;}}
.stat-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;text-align:center;}}
.stat-value{{font-size:28px;font-weight:700;color:#166534;}}
.stat-label{{font-size:12px;color:#888;}}
.tabs{{margin-bottom:16px;}}
.tab{{display:inline-block;padding:6px 16px;border:1px solid #ccc;border-radius:16px;margin-right:8px;text-decoration:none;color:#333;font-size:13px;}}
.tab.active{{background:#166534;color:#fff;border-color:#166534;}}
.campaign-card,.story-card,.news-card,.report-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.campaign-card.urgent{{border-left:4px solid #c62828;}}
.campaign-card h3 a,.story-card h3 a{{color:#1a1a1a;text-decoration:none;}}
.campaign-card h3 a:hover,.story-card h3 a:hover{{color:#166534;}}
.summary{{color:#555;font-size:14px;margin:8px 0;}}
.story-subtitle{{color:#888;font-size:13px;margin-bottom:8px;}}
.progress-bar{{background:#eee;border-radius:6px;height:10px;overflow:hidden;margin:8px 0 4px;}}
.progress-fill{{background:#2e7d32;height:100%;}}
.progress-text{{display:flex;justify-content:space-between;font-size:12px;color:#666;}}
.meta-row{{display:flex;gap:12px;align-items:center;font-size:12px;color:#888;margin-top:8px;}}
.stat{{background:#f0f0f0;padding:2px 8px;border-radius:10px;font-size:11px;color:#555;}}
.urgent-badge{{background:#fce4ec;color:#c62828;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;text-transform:uppercase;}}
.success-badge{{background:#e8f5e9;color:#2e7d32;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;text-transform:uppercase;}}
.success-badge.goal-exceeded{{background:#fff8e1;color:#b26a00;}}
.action-btn{{display:inline-block;padding:6px 16px;background:#166534;color:#fff;border-radius:4px;text-decoration:none;font-size:13px;font-weight:500;}}
.action-btn:hover{{background:#14532d;}}
.action-btn.secondary{{background:#fff;color:#166534;border:1px solid #166534;}}
.campaign-actions{{display:flex;gap:8px;margin-top:12px;}}
.updated{{display:block;color:#999;margin-top:8px;font-size:11px;}}
.back-link{{font-size:13px;color:#166534;text-decoration:none;}}
.detail-meta{{display:grid;grid-template-columns:1fr 1fr;gap:8px;margin:16px 0;font-size:13px;}}
.detail-meta dt{{color:#888;}}
.detail-meta dd{{color:#333;}}
.campaign-timeline{{margin-top:16px;padding-top:12px;border-top:1px solid #eee;}}
.campaign-timeline h3{{font-size:14px;margin-bottom:8px;}}
.timeline-item{{display:flex;gap:12px;margin-bottom:8px;font-size:13px;}}
.timeline-date{{color:#888;min-width:130px;}}
.timeline-event{{font-weight:600;}}
.timeline-description{{color:#666;}}
.outcome-banner{{background:#e8f5e9;border:1px solid #c8e6c9;padding:8px 12px;border-radius:4px;font-size:13px;color:#2e7d32;margin:12px 0;}}
.highlights{{margin:8px 0 8px 20px;font-size:13px;color:#555;}}
.card-image{{width:100%;max-height:220px;object-fit:cover;border-radius:6px;margin-bottom:8px;}}
.no-campaigns,.no-stories,.no-news,.no-reports{{color:#888;text-align:center;padding:40px;}}
</style>
</head>
<body>
<div class="header">
    <h1>Sevabrata Foundation</h1>
    <nav><a href="/">Home</a><a href="/campaigns">Campaigns</a><a href="/stories">Stories</a><a href="/news">News</a><a href="/reports">Reports</a></nav>
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
