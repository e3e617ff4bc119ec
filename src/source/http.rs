//! HTTP feed source.
//!
//! Fetches the three feed CSVs from their configured URLs. Network and
//! non-success responses surface as `PipelineError::FeedUnavailable` so a
//! caller can keep serving its previous snapshot.

use std::future::Future;
use std::pin::Pin;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::source::{FeedKind, FeedSource};

/// Feed source backed by HTTP GET requests
pub struct HttpFeedSource {
    client: reqwest::Client,
    confirmed_url: String,
    deaths_url: String,
    recovered_url: String,
}

impl HttpFeedSource {
    /// Build an HTTP source from the pipeline configuration
    ///
    /// # Errors
    /// Returns `PipelineError::Config` when the HTTP client cannot be built.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| PipelineError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            confirmed_url: config.confirmed_url.clone(),
            deaths_url: config.deaths_url.clone(),
            recovered_url: config.recovered_url.clone(),
        })
    }

    fn url_for(&self, feed: FeedKind) -> &str {
        match feed {
            FeedKind::Confirmed => &self.confirmed_url,
            FeedKind::Deaths => &self.deaths_url,
            FeedKind::Recovered => &self.recovered_url,
        }
    }

    async fn get_body(&self, feed: FeedKind) -> Result<String> {
        let url = self.url_for(feed);
        log::debug!("fetching {feed} feed from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::FeedUnavailable {
                feed,
                reason: format!("request to {url} failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::FeedUnavailable {
                feed,
                reason: format!("{url} returned HTTP {status}"),
            });
        }

        response
            .text()
            .await
            .map_err(|e| PipelineError::FeedUnavailable {
                feed,
                reason: format!("failed to read body from {url}: {e}"),
            })
    }
}

impl FeedSource for HttpFeedSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch_csv<'a>(
        &'a self,
        feed: FeedKind,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(self.get_body(feed))
    }
}
