//! Configuration for pipeline runs.

use std::time::Duration;

use crate::error::{PipelineError, Result};
use crate::source::FeedKind;

/// Upstream endpoint for the confirmed-cases feed
pub const DEFAULT_CONFIRMED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

/// Upstream endpoint for the deaths feed
pub const DEFAULT_DEATHS_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_global.csv";

/// Upstream endpoint for the recovered feed
pub const DEFAULT_RECOVERED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_recovered_global.csv";

/// Configuration for the feed pipeline
///
/// The defaults describe the live feeds: four identity columns
/// (`Province/State`, `Country/Region`, `Lat`, `Long`) followed by one column
/// per date labelled `M/D/YY`.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Endpoint of the confirmed-cases feed
    pub confirmed_url: String,
    /// Endpoint of the deaths feed
    pub deaths_url: String,
    /// Endpoint of the recovered feed
    pub recovered_url: String,
    /// Per-request timeout for feed fetches
    pub fetch_timeout: Duration,
    /// Header names of the identity block preceding the first date column
    pub identity_headers: Vec<String>,
    /// chrono format string for the date-column labels
    pub date_label_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confirmed_url: DEFAULT_CONFIRMED_URL.to_string(),
            deaths_url: DEFAULT_DEATHS_URL.to_string(),
            recovered_url: DEFAULT_RECOVERED_URL.to_string(),
            fetch_timeout: Duration::from_secs(30),
            identity_headers: vec![
                "Province/State".to_string(),
                "Country/Region".to_string(),
                "Lat".to_string(),
                "Long".to_string(),
            ],
            date_label_format: "%m/%d/%y".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with the default feed layout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the three feed endpoints
    #[must_use]
    pub fn with_feed_urls(
        mut self,
        confirmed: impl Into<String>,
        deaths: impl Into<String>,
        recovered: impl Into<String>,
    ) -> Self {
        self.confirmed_url = confirmed.into();
        self.deaths_url = deaths.into();
        self.recovered_url = recovered.into();
        self
    }

    /// Set the per-request fetch timeout
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Endpoint for one feed
    #[must_use]
    pub fn url_for(&self, feed: FeedKind) -> &str {
        match feed {
            FeedKind::Confirmed => &self.confirmed_url,
            FeedKind::Deaths => &self.deaths_url,
            FeedKind::Recovered => &self.recovered_url,
        }
    }

    /// Number of identity columns preceding the first date column
    #[must_use]
    pub fn identity_len(&self) -> usize {
        self.identity_headers.len()
    }

    /// Check the configuration before a run
    ///
    /// # Errors
    /// Returns a configuration error when an endpoint is empty, the identity
    /// block lists fewer than four columns, or the date format is empty.
    pub fn validate(&self) -> Result<()> {
        for feed in FeedKind::ALL {
            if self.url_for(feed).trim().is_empty() {
                return Err(PipelineError::config(format!("empty endpoint for the {feed} feed")));
            }
        }
        // The feeds carry four identity columns; a shorter block would make
        // positional date slicing ambiguous.
        if self.identity_headers.len() < 4 {
            return Err(PipelineError::config(format!(
                "identity block lists {} columns, at least 4 are required",
                self.identity_headers.len()
            )));
        }
        if self.date_label_format.trim().is_empty() {
            return Err(PipelineError::config("empty date label format"));
        }
        if self.fetch_timeout.is_zero() {
            return Err(PipelineError::config("zero fetch timeout"));
        }
        Ok(())
    }
}
