//! Campaign data sources. One fetch per load; no retries.

use crate::payload::parse_campaigns;
use async_trait::async_trait;
use campaign_core::config::DataSourceConfig;
use campaign_core::{Campaign, CampaignError, CampaignResult};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Trait for anything that can produce the full campaign list.
#[async_trait]
pub trait CampaignSource: Send + Sync {
    fn describe(&self) -> String;
    async fn fetch(&self) -> CampaignResult<Vec<Campaign>>;
}

// ─── HTTP endpoint ──────────────────────────────────────────────────────────

pub struct HttpCampaignSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpCampaignSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &DataSourceConfig) -> Self {
        Self::new(config.url.clone(), Duration::from_millis(config.timeout_ms))
    }
}

#[async_trait]
impl CampaignSource for HttpCampaignSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> CampaignResult<Vec<Campaign>> {
        debug!(url = %self.url, "Fetching campaign data");
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CampaignError::Fetch(format!("Failed to fetch campaign data: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CampaignError::Fetch(format!(
                "HTTP {}: Failed to fetch campaign data",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CampaignError::Fetch(format!("Failed to read response: {}", e)))?;

        parse_campaigns(&body)
    }
}

// ─── Local file ─────────────────────────────────────────────────────────────

pub struct FileCampaignSource {
    path: PathBuf,
}

impl FileCampaignSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CampaignSource for FileCampaignSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> CampaignResult<Vec<Campaign>> {
        debug!(path = %self.path.display(), "Reading campaign data");
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_campaigns(&body)
    }
}

/// Result of a single load. A failed load carries its message and an empty
/// campaign list so the views still render as zero/empty.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub campaigns: Vec<Campaign>,
    pub error: Option<String>,
}

pub async fn load_or_empty(source: &dyn CampaignSource) -> LoadOutcome {
    match source.fetch().await {
        Ok(campaigns) => {
            info!(source = %source.describe(), campaigns = campaigns.len(), "Campaign data loaded");
            LoadOutcome {
                campaigns,
                error: None,
            }
        }
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "Campaign data load failed");
            LoadOutcome {
                campaigns: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}
