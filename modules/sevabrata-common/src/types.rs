use serde::{Deserialize, Serialize};

/// Index file listing the content records in one directory.
///
/// Historical manifests name their list after the content category
/// (`campaigns`, `stories`, or `articles`); all three are accepted and
/// default to empty so a manifest for one category parses for any of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub campaigns: Vec<String>,
    #[serde(default)]
    pub stories: Vec<String>,
    #[serde(default)]
    pub articles: Vec<String>,
}

impl Manifest {
    pub fn entries(&self, category: ManifestCategory) -> &[String] {
        match category {
            ManifestCategory::Campaigns => &self.campaigns,
            ManifestCategory::Stories => &self.stories,
            ManifestCategory::Articles => &self.articles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestCategory {
    Campaigns,
    Stories,
    Articles,
}

/// The four campaign directories on the content host. These are directory
/// names, not a schema for the free-text `status` field on records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignPhase {
    Active,
    Completed,
    Ended,
    Archived,
}

impl CampaignPhase {
    pub const ALL: [CampaignPhase; 4] = [
        CampaignPhase::Active,
        CampaignPhase::Completed,
        CampaignPhase::Ended,
        CampaignPhase::Archived,
    ];

    pub fn dir(&self) -> &'static str {
        match self {
            CampaignPhase::Active => "active",
            CampaignPhase::Completed => "completed",
            CampaignPhase::Ended => "ended",
            CampaignPhase::Archived => "archived",
        }
    }
}

/// Manifest entry counts per campaign directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CampaignCounts {
    pub active: usize,
    pub completed: usize,
    pub ended: usize,
    pub archived: usize,
    pub total: usize,
}

/// Nested patient block as it appears in campaign JSON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub date: String,
    pub event: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A campaign file as stored on the content host. Loosely typed: most
/// fields are optional and no cross-field invariants hold (raised may
/// exceed target, status is free text).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub target_amount: i64,
    #[serde(default)]
    pub raised_amount: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub patient_details: Option<PatientDetails>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
}

/// The flat shape the renderers consume. `patientDetails` is flattened;
/// an absent nested block leaves all four patient fields `None`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub description: String,
    pub full_description: Option<String>,
    pub image: Option<String>,
    pub target_amount: i64,
    pub raised_amount: i64,
    pub status: String,
    pub urgency: Option<String>,
    pub category: Option<String>,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub medical_condition: Option<String>,
    pub hospital: Option<String>,
    pub timeline: Vec<TimelineEntry>,
    pub last_updated: Option<String>,
    pub created_date: Option<String>,
}

impl From<CampaignRecord> for Campaign {
    fn from(record: CampaignRecord) -> Self {
        let patient = record.patient_details.unwrap_or_default();
        Campaign {
            id: record.id,
            title: record.title,
            description: record.short_description.unwrap_or_default(),
            full_description: record.full_description,
            image: record.image,
            target_amount: record.target_amount,
            raised_amount: record.raised_amount,
            status: record.status.unwrap_or_else(|| "active".to_string()),
            urgency: record.urgency,
            category: record.category,
            patient_name: patient.name,
            patient_age: patient.age,
            medical_condition: patient.condition,
            hospital: patient.hospital,
            timeline: record.timeline,
            last_updated: record.last_updated,
            created_date: record.created_date,
        }
    }
}

impl Campaign {
    /// Percentage of target raised, rounded. Not clamped — display code
    /// decides how to present over-funded campaigns.
    pub fn progress_percent(&self) -> i64 {
        if self.target_amount <= 0 {
            return 0;
        }
        ((self.raised_amount as f64 / self.target_amount as f64) * 100.0).round() as i64
    }

    /// Amount still needed, floored at zero.
    pub fn amount_needed(&self) -> i64 {
        (self.target_amount - self.raised_amount).max(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStory {
    pub id: String,
    pub patient_name: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub amount_raised: Option<i64>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// News files disagree on the date field name across revisions
/// (`publishedDate` vs `publishDate`); both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "publishDate")]
    pub published_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Site-wide statistics from `campaigns/_stats.json`. Everything defaults
/// so a missing or partial file renders as zeros rather than failing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
    #[serde(default)]
    pub total_campaigns: u32,
    #[serde(default)]
    pub active_campaigns: u32,
    #[serde(default)]
    pub total_amount_raised: i64,
    #[serde(default)]
    pub lives_impacted: u32,
    #[serde(default)]
    pub success_rate: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Annual report metadata. The foundation publishes these as PDFs next to
/// the JSON content; the list itself ships with the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualReport {
    pub id: String,
    pub title: String,
    pub description: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: String,
    pub publish_date: String,
    pub year: String,
    pub pages: u32,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign_json(patient_details: &str) -> String {
        format!(
            r#"{{
                "id": "tuku-kidney-transplant",
                "title": "Help Tuku",
                "shortDescription": "Kidney transplant support",
                "fullDescription": "Longer text",
                "targetAmount": 500000,
                "raisedAmount": 125000,
                "status": "active",
                "urgency": "high",
                "lastUpdated": "2024-03-15"
                {patient_details}
            }}"#
        )
    }

    #[test]
    fn flattens_nested_patient_details() {
        let json = campaign_json(
            r#", "patientDetails": {
                "name": "Tuku",
                "age": 34,
                "condition": "Chronic kidney disease",
                "hospital": "SSKM Hospital"
            }"#,
        );
        let record: CampaignRecord = serde_json::from_str(&json).unwrap();
        let campaign = Campaign::from(record);

        assert_eq!(campaign.patient_name.as_deref(), Some("Tuku"));
        assert_eq!(campaign.patient_age, Some(34));
        assert_eq!(
            campaign.medical_condition.as_deref(),
            Some("Chronic kidney disease")
        );
        assert_eq!(campaign.hospital.as_deref(), Some("SSKM Hospital"));
        assert_eq!(campaign.description, "Kidney transplant support");
    }

    #[test]
    fn absent_patient_details_flatten_to_none() {
        let record: CampaignRecord = serde_json::from_str(&campaign_json("")).unwrap();
        let campaign = Campaign::from(record);

        assert_eq!(campaign.patient_name, None);
        assert_eq!(campaign.patient_age, None);
        assert_eq!(campaign.medical_condition, None);
        assert_eq!(campaign.hospital, None);
    }

    #[test]
    fn progress_handles_overfunded_and_zero_target() {
        let mut c = Campaign {
            target_amount: 100_000,
            raised_amount: 150_000,
            ..Default::default()
        };
        assert_eq!(c.progress_percent(), 150);
        assert_eq!(c.amount_needed(), 0);

        c.target_amount = 0;
        assert_eq!(c.progress_percent(), 0);
    }

    #[test]
    fn news_accepts_both_date_field_names() {
        let a: NewsArticle = serde_json::from_str(
            r#"{"id": "n1", "title": "T", "publishedDate": "2024-01-01"}"#,
        )
        .unwrap();
        let b: NewsArticle =
            serde_json::from_str(r#"{"id": "n2", "title": "T", "publishDate": "2024-02-02"}"#)
                .unwrap();
        assert_eq!(a.published_date.as_deref(), Some("2024-01-01"));
        assert_eq!(b.published_date.as_deref(), Some("2024-02-02"));
    }

    #[test]
    fn manifest_defaults_all_lists() {
        let m: Manifest = serde_json::from_str(r#"{"stories": ["a.json"]}"#).unwrap();
        assert!(m.entries(ManifestCategory::Campaigns).is_empty());
        assert_eq!(m.entries(ManifestCategory::Stories), ["a.json"]);
        assert!(m.entries(ManifestCategory::Articles).is_empty());
    }

    #[test]
    fn stats_tolerate_partial_files() {
        let s: CampaignStats = serde_json::from_str(r#"{"activeCampaigns": 3}"#).unwrap();
        assert_eq!(s.active_campaigns, 3);
        assert_eq!(s.total_amount_raised, 0);
    }
}
