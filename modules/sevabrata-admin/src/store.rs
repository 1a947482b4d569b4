//! Session-scoped content store.
//!
//! The content host is static files, so there is nothing to write to:
//! every mutation here lives in memory for the lifetime of the process
//! and is lost on restart. Handlers go through the named operations
//! below instead of touching the vectors directly.

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use sevabrata_common::{Campaign, CampaignCounts, SuccessStory};

/// Fields accepted from the add/edit campaign form, already parsed.
#[derive(Debug, Clone, Default)]
pub struct CampaignDraft {
    pub title: String,
    pub category: Option<String>,
    pub short_description: String,
    pub full_description: Option<String>,
    pub target_amount: i64,
    pub raised_amount: i64,
    pub urgency: Option<String>,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub medical_condition: Option<String>,
    pub hospital: Option<String>,
}

/// Fields accepted from the add/edit story form, already parsed.
#[derive(Debug, Clone, Default)]
pub struct StoryDraft {
    pub patient_name: String,
    pub condition: Option<String>,
    pub treatment: Option<String>,
    pub hospital: Option<String>,
    pub year: Option<i32>,
    pub amount_raised: Option<i64>,
    pub outcome: Option<String>,
    pub description: Option<String>,
}

#[derive(Default)]
pub struct ContentStore {
    campaigns: RwLock<Vec<Campaign>>,
    stories: RwLock<Vec<SuccessStory>>,
    counts: RwLock<CampaignCounts>,
}

fn today() -> String {
    Utc::now().date_naive().to_string()
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a fresh load from the content host.
    pub async fn replace_all(
        &self,
        campaigns: Vec<Campaign>,
        stories: Vec<SuccessStory>,
        counts: CampaignCounts,
    ) {
        *self.campaigns.write().await = campaigns;
        *self.stories.write().await = stories;
        *self.counts.write().await = counts;
    }

    pub async fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.read().await.clone()
    }

    pub async fn stories(&self) -> Vec<SuccessStory> {
        self.stories.read().await.clone()
    }

    pub async fn counts(&self) -> CampaignCounts {
        *self.counts.read().await
    }

    pub async fn find_campaign(&self, id: &str) -> Option<Campaign> {
        self.campaigns
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn find_story(&self, id: &str) -> Option<SuccessStory> {
        self.stories
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Sum of raised amounts across loaded campaigns, for the dashboard.
    pub async fn total_raised(&self) -> i64 {
        self.campaigns
            .read()
            .await
            .iter()
            .map(|c| c.raised_amount)
            .sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.campaigns.read().await.is_empty()
            && self.stories.read().await.is_empty()
            && self.counts.read().await.total == 0
    }

    /// Add a campaign: generated id, status `active`, dates stamped today.
    /// New campaigns go to the front of the list.
    pub async fn add_campaign(&self, draft: CampaignDraft) -> Campaign {
        let campaign = Campaign {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.short_description,
            full_description: draft.full_description,
            image: None,
            target_amount: draft.target_amount,
            raised_amount: draft.raised_amount,
            status: "active".to_string(),
            urgency: draft.urgency,
            category: draft.category,
            patient_name: draft.patient_name,
            patient_age: draft.patient_age,
            medical_condition: draft.medical_condition,
            hospital: draft.hospital,
            timeline: Vec::new(),
            last_updated: Some(today()),
            created_date: Some(today()),
        };

        self.campaigns.write().await.insert(0, campaign.clone());

        let mut counts = self.counts.write().await;
        counts.active += 1;
        counts.total += 1;

        campaign
    }

    /// Edit a campaign in place, preserving status and creation date.
    pub async fn update_campaign(&self, id: &str, draft: CampaignDraft) -> bool {
        let mut campaigns = self.campaigns.write().await;
        let Some(campaign) = campaigns.iter_mut().find(|c| c.id == id) else {
            return false;
        };

        campaign.title = draft.title;
        campaign.category = draft.category;
        campaign.description = draft.short_description;
        campaign.full_description = draft.full_description;
        campaign.target_amount = draft.target_amount;
        campaign.raised_amount = draft.raised_amount;
        campaign.urgency = draft.urgency;
        campaign.patient_name = draft.patient_name;
        campaign.patient_age = draft.patient_age;
        campaign.medical_condition = draft.medical_condition;
        campaign.hospital = draft.hospital;
        campaign.last_updated = Some(today());
        true
    }

    /// Flip a campaign between active and paused. Returns the new status.
    pub async fn toggle_campaign_status(&self, id: &str) -> Option<String> {
        let mut campaigns = self.campaigns.write().await;
        let campaign = campaigns.iter_mut().find(|c| c.id == id)?;

        campaign.status = if campaign.status == "active" {
            "paused".to_string()
        } else {
            "active".to_string()
        };
        campaign.last_updated = Some(today());
        Some(campaign.status.clone())
    }

    /// Mark a campaign completed. The target is assumed reached.
    pub async fn complete_campaign(&self, id: &str) -> bool {
        let mut campaigns = self.campaigns.write().await;
        let Some(campaign) = campaigns.iter_mut().find(|c| c.id == id) else {
            return false;
        };

        campaign.status = "completed".to_string();
        campaign.raised_amount = campaign.target_amount;
        campaign.last_updated = Some(today());
        drop(campaigns);

        let mut counts = self.counts.write().await;
        counts.active = counts.active.saturating_sub(1);
        counts.ended += 1;
        true
    }

    pub async fn add_story(&self, draft: StoryDraft) -> SuccessStory {
        let story = SuccessStory {
            id: Uuid::new_v4().to_string(),
            patient_name: draft.patient_name,
            condition: draft.condition,
            treatment: draft.treatment,
            hospital: draft.hospital,
            year: draft.year.or_else(|| {
                use chrono::Datelike;
                Some(Utc::now().year())
            }),
            amount_raised: draft.amount_raised,
            outcome: draft.outcome,
            description: draft.description,
            image: None,
        };

        self.stories.write().await.insert(0, story.clone());
        story
    }

    pub async fn update_story(&self, id: &str, draft: StoryDraft) -> bool {
        let mut stories = self.stories.write().await;
        let Some(story) = stories.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        story.patient_name = draft.patient_name;
        story.condition = draft.condition;
        story.treatment = draft.treatment;
        story.hospital = draft.hospital;
        story.year = draft.year.or(story.year);
        story.amount_raised = draft.amount_raised;
        story.outcome = draft.outcome;
        story.description = draft.description;
        true
    }

    pub async fn delete_story(&self, id: &str) -> bool {
        let mut stories = self.stories.write().await;
        let before = stories.len();
        stories.retain(|s| s.id != id);
        stories.len() != before
    }
}

/// Sample dataset for development: seeded only in debug builds and only
/// when the content host returned nothing, so the panel is never blank
/// while hacking locally. Release builds show the true empty state.
#[cfg(debug_assertions)]
pub fn sample_data() -> (Vec<Campaign>, Vec<SuccessStory>, CampaignCounts) {
    let campaigns = vec![
        Campaign {
            id: "sample-rina-cardiac".to_string(),
            title: "Help Rina's Cardiac Surgery".to_string(),
            description: "Urgent valve replacement for a 12-year-old".to_string(),
            target_amount: 450_000,
            raised_amount: 180_000,
            status: "active".to_string(),
            urgency: Some("high".to_string()),
            patient_name: Some("Rina".to_string()),
            patient_age: Some(12),
            medical_condition: Some("Rheumatic heart disease".to_string()),
            hospital: Some("SSKM Hospital".to_string()),
            last_updated: Some("2024-06-01".to_string()),
            ..Default::default()
        },
        Campaign {
            id: "sample-anil-dialysis".to_string(),
            title: "Dialysis Support for Anil".to_string(),
            description: "Six months of dialysis while awaiting transplant".to_string(),
            target_amount: 240_000,
            raised_amount: 240_000,
            status: "completed".to_string(),
            last_updated: Some("2024-02-15".to_string()),
            ..Default::default()
        },
    ];

    let stories = vec![SuccessStory {
        id: "sample-prakash-heart".to_string(),
        patient_name: "Prakash".to_string(),
        condition: Some("Congenital heart defect".to_string()),
        treatment: Some("Open heart surgery".to_string()),
        year: Some(2019),
        amount_raised: Some(450_000),
        outcome: Some("Full recovery, back in school".to_string()),
        description: Some("Prakash's family could not afford the surgery he needed.".to_string()),
        ..Default::default()
    }];

    let counts = CampaignCounts {
        active: 1,
        completed: 1,
        ended: 0,
        archived: 0,
        total: 2,
    };

    (campaigns, stories, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> CampaignDraft {
        CampaignDraft {
            title: title.to_string(),
            short_description: "desc".to_string(),
            target_amount: 100_000,
            raised_amount: 10_000,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn toggle_touches_only_the_target_campaign() {
        let store = ContentStore::new();
        let a = store.add_campaign(draft("A")).await;
        let b = store.add_campaign(draft("B")).await;

        let new_status = store.toggle_campaign_status(&a.id).await;
        assert_eq!(new_status.as_deref(), Some("paused"));

        let campaigns = store.campaigns().await;
        let a_after = campaigns.iter().find(|c| c.id == a.id).unwrap();
        let b_after = campaigns.iter().find(|c| c.id == b.id).unwrap();
        assert_eq!(a_after.status, "paused");
        assert_eq!(b_after.status, "active");

        // Toggling back resumes
        let new_status = store.toggle_campaign_status(&a.id).await;
        assert_eq!(new_status.as_deref(), Some("active"));
    }

    #[tokio::test]
    async fn complete_assumes_target_reached_and_shifts_counts() {
        let store = ContentStore::new();
        let c = store.add_campaign(draft("C")).await;
        assert_eq!(store.counts().await.active, 1);

        assert!(store.complete_campaign(&c.id).await);

        let after = store.find_campaign(&c.id).await.unwrap();
        assert_eq!(after.status, "completed");
        assert_eq!(after.raised_amount, after.target_amount);

        let counts = store.counts().await;
        assert_eq!(counts.active, 0);
        assert_eq!(counts.ended, 1);
    }

    #[tokio::test]
    async fn new_campaigns_go_to_the_front() {
        let store = ContentStore::new();
        store.add_campaign(draft("first")).await;
        store.add_campaign(draft("second")).await;

        let campaigns = store.campaigns().await;
        assert_eq!(campaigns[0].title, "second");
        assert_eq!(campaigns[1].title, "first");
    }

    #[tokio::test]
    async fn delete_story_removes_only_that_story() {
        let store = ContentStore::new();
        let s1 = store
            .add_story(StoryDraft {
                patient_name: "One".to_string(),
                ..Default::default()
            })
            .await;
        let s2 = store
            .add_story(StoryDraft {
                patient_name: "Two".to_string(),
                ..Default::default()
            })
            .await;

        assert!(store.delete_story(&s1.id).await);
        assert!(!store.delete_story(&s1.id).await);

        let stories = store.stories().await;
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, s2.id);
    }

    #[tokio::test]
    async fn update_missing_campaign_is_a_noop() {
        let store = ContentStore::new();
        assert!(!store.update_campaign("ghost", draft("X")).await);
        assert!(store.campaigns().await.is_empty());
    }
}
