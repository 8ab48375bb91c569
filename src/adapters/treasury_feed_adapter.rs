//! HTTP adapter for the Treasury daily yield-curve XML feed.

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::domain::error::{DeskError, FeedError};
use crate::domain::feed::FeedPeriod;
use crate::domain::settings::FeedSettings;
use crate::ports::config_port::ConfigPort;
use crate::ports::feed_port::FeedPort;

#[derive(Clone)]
pub struct TreasuryFeedAdapter {
    client: reqwest::Client,
    url_template: String,
}

impl TreasuryFeedAdapter {
    pub fn new(settings: &FeedSettings) -> Result<Self, DeskError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DeskError::ConfigInvalid {
            section: "feed".into(),
            key: "timeout_secs".into(),
            reason: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            url_template: settings.url_template.clone(),
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DeskError> {
        Self::new(&FeedSettings::from_config(config)?)
    }

    pub fn url_for(&self, period: FeedPeriod) -> String {
        period.apply(&self.url_template)
    }
}

#[async_trait]
impl FeedPort for TreasuryFeedAdapter {
    async fn fetch_month(&self, period: FeedPeriod) -> Result<String, FeedError> {
        let url = self.url_for(period);
        tracing::debug!(%url, "requesting yield curve feed");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/xml")
            .send()
            .await
            .map_err(|e| FeedError::UpstreamUnavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamUnavailable {
                reason: format!("{url} returned {status}"),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FeedError::UpstreamUnavailable {
                reason: format!("failed to read response body: {e}"),
            })
    }
}
