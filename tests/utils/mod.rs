use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use covid_series::{
    FeedKind, FeedSource, Pipeline, PipelineConfig, PipelineError, Result, StaticFeedSource,
};

/// Identity block shared by every fixture table
pub const IDENTITY_HEADER: &str = "Province/State,Country/Region,Lat,Long";

/// Build a wide-format CSV body from date labels and pre-rendered data rows
#[must_use]
pub fn wide_csv(dates: &[&str], rows: &[&str]) -> String {
    let mut body = format!("{IDENTITY_HEADER},{}\n", dates.join(","));
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    body
}

/// Two days of a single Danish row across all three feeds
///
/// Confirmed goes 10 -> 15, deaths 1 -> 2, recovered is absent on the first
/// day and 3 on the second.
#[must_use]
pub fn denmark_two_day_source() -> StaticFeedSource {
    let dates = ["1/22/20", "1/23/20"];
    StaticFeedSource::new(
        wide_csv(&dates, &[",Denmark,56.2639,9.5018,10,15"]),
        wide_csv(&dates, &[",Denmark,56.2639,9.5018,1,2"]),
        wide_csv(&dates, &[",Denmark,56.2639,9.5018,,3"]),
    )
}

/// Pipeline over the given source with the default configuration
#[must_use]
pub fn pipeline_with(source: impl FeedSource + 'static) -> Pipeline {
    Pipeline::with_source(PipelineConfig::default(), Box::new(source))
        .expect("default configuration is valid")
}

/// Source whose every fetch fails
pub struct FailingSource;

impl FeedSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn fetch_csv<'a>(
        &'a self,
        feed: FeedKind,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            Err(PipelineError::FeedUnavailable {
                feed,
                reason: "connection refused".to_string(),
            })
        })
    }
}

/// Source that can be switched between healthy and failing between refreshes
pub struct ToggleSource {
    inner: StaticFeedSource,
    healthy: Arc<AtomicBool>,
}

impl ToggleSource {
    /// Wrap a static source; the returned flag switches it off when cleared
    #[must_use]
    pub fn new(inner: StaticFeedSource) -> (Self, Arc<AtomicBool>) {
        let healthy = Arc::new(AtomicBool::new(true));
        let source = Self {
            inner,
            healthy: Arc::clone(&healthy),
        };
        (source, healthy)
    }
}

impl FeedSource for ToggleSource {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn fetch_csv<'a>(
        &'a self,
        feed: FeedKind,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        if self.healthy.load(Ordering::SeqCst) {
            self.inner.fetch_csv(feed)
        } else {
            Box::pin(async move {
                Err(PipelineError::FeedUnavailable {
                    feed,
                    reason: "source switched off".to_string(),
                })
            })
        }
    }
}
