//! Client for the foundation's static content host.
//!
//! All content lives as plain JSON files behind an HTTP server: per-category
//! directories with a `manifest.json` index listing the record files. The
//! loader is deliberately fail-soft — a missing manifest or an unfetchable
//! item degrades to "not available" rather than an error, because the public
//! site must render (with empty states) even when the host is misbehaving.

pub mod error;

pub use error::{ContentError, Result};

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::warn;

use sevabrata_common::{
    Campaign, CampaignCounts, CampaignPhase, CampaignRecord, CampaignStats, Category, Manifest,
    ManifestCategory, NewsArticle, SuccessStory,
};

#[derive(Debug)]
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// Build a client for the given content host.
    ///
    /// Rejects non-HTTP schemes outright: the content layout only works
    /// behind a web server, and a `file:` base is the classic operator
    /// mistake this guards against.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|_| ContentError::InvalidBaseUrl(base_url.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            _ => return Err(ContentError::UnsupportedScheme(base_url.to_string())),
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and parse one JSON file. Single attempt, no retry.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ContentError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// The one parameterized loader every content category goes through.
    ///
    /// Fetches `<dir>/manifest.json`, then every listed file concurrently.
    /// A failed manifest yields an empty vector; a failed item is logged
    /// and omitted, so a manifest listing N files with K fetchable returns
    /// exactly K records, in manifest order.
    pub async fn load_manifest_items<T: DeserializeOwned>(
        &self,
        dir: &str,
        category: ManifestCategory,
    ) -> Vec<T> {
        let manifest: Manifest = match self.fetch_json(&format!("{dir}/manifest.json")).await {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, dir, "Failed to load manifest");
                return Vec::new();
            }
        };

        let fetches = manifest.entries(category).iter().map(|filename| {
            let path = format!("{dir}/{filename}");
            async move {
                match self.fetch_json::<T>(&path).await {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!(error = %e, path, "Skipping unavailable content item");
                        None
                    }
                }
            }
        });

        futures::future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Normalized campaigns from one phase directory.
    pub async fn load_campaigns(&self, phase: CampaignPhase) -> Vec<Campaign> {
        self.load_manifest_items::<CampaignRecord>(
            &format!("campaigns/{}", phase.dir()),
            ManifestCategory::Campaigns,
        )
        .await
        .into_iter()
        .map(Campaign::from)
        .collect()
    }

    /// Campaigns from every phase directory, phases fetched concurrently.
    pub async fn load_all_campaigns(&self) -> Vec<Campaign> {
        let fetches = CampaignPhase::ALL.iter().map(|phase| self.load_campaigns(*phase));
        futures::future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// The "completed" public view merges the completed and ended
    /// directories.
    pub async fn load_completed_campaigns(&self) -> Vec<Campaign> {
        let (completed, ended) = futures::join!(
            self.load_campaigns(CampaignPhase::Completed),
            self.load_campaigns(CampaignPhase::Ended)
        );
        completed.into_iter().chain(ended).collect()
    }

    /// Look one campaign up by id, probing each phase directory in order.
    pub async fn fetch_campaign(&self, id: &str) -> Option<Campaign> {
        for phase in CampaignPhase::ALL {
            let path = format!("campaigns/{}/{id}.json", phase.dir());
            match self.fetch_json::<CampaignRecord>(&path).await {
                Ok(record) => return Some(Campaign::from(record)),
                Err(ContentError::Status { status: 404, .. }) => continue,
                Err(e) => {
                    warn!(error = %e, path, "Campaign lookup failed");
                    continue;
                }
            }
        }
        None
    }

    pub async fn load_success_stories(&self) -> Vec<SuccessStory> {
        self.load_manifest_items("success-stories", ManifestCategory::Stories)
            .await
    }

    pub async fn fetch_success_story(&self, id: &str) -> Option<SuccessStory> {
        self.load_success_stories()
            .await
            .into_iter()
            .find(|s| s.id == id)
    }

    pub async fn load_news(&self) -> Vec<NewsArticle> {
        self.load_manifest_items("news", ManifestCategory::Articles)
            .await
    }

    /// Site-wide stats; any failure collapses to all-zero stats.
    pub async fn load_stats(&self) -> CampaignStats {
        match self.fetch_json("campaigns/_stats.json").await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "Failed to load stats");
                CampaignStats::default()
            }
        }
    }

    pub async fn load_categories(&self) -> Vec<Category> {
        match self.fetch_json("campaigns/_categories.json").await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "Failed to load categories");
                Vec::new()
            }
        }
    }

    /// Manifest entry counts per phase, without fetching any items.
    pub async fn campaign_counts(&self) -> CampaignCounts {
        let fetches = CampaignPhase::ALL.iter().map(|phase| async move {
            let dir = format!("campaigns/{}", phase.dir());
            match self
                .fetch_json::<Manifest>(&format!("{dir}/manifest.json"))
                .await
            {
                Ok(manifest) => manifest.campaigns.len(),
                Err(e) => {
                    warn!(error = %e, dir, "Failed to load manifest for counts");
                    0
                }
            }
        });
        let per_phase: Vec<usize> = futures::future::join_all(fetches).await;

        CampaignCounts {
            active: per_phase[0],
            completed: per_phase[1],
            ended: per_phase[2],
            archived: per_phase[3],
            total: per_phase.iter().sum(),
        }
    }
}
