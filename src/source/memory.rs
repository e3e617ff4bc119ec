//! In-memory feed source for tests and offline runs.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::source::{FeedKind, FeedSource};

/// Feed source that serves three pre-loaded CSV bodies
#[derive(Debug, Clone)]
pub struct StaticFeedSource {
    confirmed: String,
    deaths: String,
    recovered: String,
}

impl StaticFeedSource {
    /// Create a source from the three CSV bodies
    pub fn new(
        confirmed: impl Into<String>,
        deaths: impl Into<String>,
        recovered: impl Into<String>,
    ) -> Self {
        Self {
            confirmed: confirmed.into(),
            deaths: deaths.into(),
            recovered: recovered.into(),
        }
    }
}

impl FeedSource for StaticFeedSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn fetch_csv<'a>(
        &'a self,
        feed: FeedKind,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        let body = match feed {
            FeedKind::Confirmed => self.confirmed.clone(),
            FeedKind::Deaths => self.deaths.clone(),
            FeedKind::Recovered => self.recovered.clone(),
        };
        Box::pin(async move { Ok(body) })
    }
}
