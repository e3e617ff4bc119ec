//! Source feeds for the pipeline.
//!
//! This module defines the three wide-format feeds and the boundary through
//! which their raw CSV bodies are obtained. Available feeds:
//! - Confirmed: cumulative confirmed case counts per region and date
//! - Deaths: cumulative death counts per region and date
//! - Recovered: cumulative recovery counts per region and date
//!
//! The fetch boundary is a trait so the pipeline can run against the live
//! HTTP endpoints, an in-memory source, or anything else that can produce the
//! three CSV bodies.

pub mod http;
pub mod memory;
pub mod table;

pub use http::HttpFeedSource;
pub use memory::StaticFeedSource;
pub use table::{WideRow, WideTable};

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::config::PipelineConfig;
use crate::error::Result;

/// Identifies one of the three source feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Cumulative confirmed case counts
    Confirmed,
    /// Cumulative death counts
    Deaths,
    /// Cumulative recovery counts
    Recovered,
}

impl FeedKind {
    /// All feeds, in merge order (confirmed is the join's left side)
    pub const ALL: [Self; 3] = [Self::Confirmed, Self::Deaths, Self::Recovered];

    /// Stable lowercase feed name, which is also the melted value-column name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three decoded wide tables of one pipeline run
#[derive(Debug, Clone)]
pub struct RawTables {
    /// Confirmed-cases wide table
    pub confirmed: WideTable,
    /// Deaths wide table
    pub deaths: WideTable,
    /// Recovered wide table
    pub recovered: WideTable,
}

impl RawTables {
    /// The three tables in feed order
    #[must_use]
    pub fn tables(&self) -> [&WideTable; 3] {
        [&self.confirmed, &self.deaths, &self.recovered]
    }
}

/// Base trait for feed sources
pub trait FeedSource: Send + Sync {
    /// Short source name for logging
    fn name(&self) -> &'static str;

    /// Fetch the raw CSV body of one feed
    fn fetch_csv<'a>(
        &'a self,
        feed: FeedKind,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

/// Fetch all three feeds concurrently and decode them into wide tables
///
/// The fetches are independent read-only requests and run concurrently; the
/// first failure aborts the load. Decoding starts only once all three bodies
/// are fully in hand.
///
/// # Errors
/// Returns an error when any fetch fails or any body cannot be decoded.
pub async fn load_raw_tables(
    source: &dyn FeedSource,
    config: &PipelineConfig,
) -> Result<RawTables> {
    log::info!("fetching {} feeds from '{}' source", FeedKind::ALL.len(), source.name());

    let (confirmed_body, deaths_body, recovered_body) = futures::try_join!(
        source.fetch_csv(FeedKind::Confirmed),
        source.fetch_csv(FeedKind::Deaths),
        source.fetch_csv(FeedKind::Recovered),
    )?;

    let identity_len = config.identity_len();
    let raw = RawTables {
        confirmed: WideTable::from_csv(FeedKind::Confirmed, &confirmed_body, identity_len)?,
        deaths: WideTable::from_csv(FeedKind::Deaths, &deaths_body, identity_len)?,
        recovered: WideTable::from_csv(FeedKind::Recovered, &recovered_body, identity_len)?,
    };

    log::info!(
        "decoded feeds: {} confirmed, {} deaths, {} recovered rows across {} date columns",
        raw.confirmed.num_rows(),
        raw.deaths.num_rows(),
        raw.recovered.num_rows(),
        raw.confirmed.date_labels().len(),
    );

    Ok(raw)
}
