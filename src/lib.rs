//! covid-series: a processing pipeline for wide-format COVID-19 case feeds.
//!
//! The pipeline fetches the three JHU CSSE time-series CSVs (confirmed,
//! deaths, recovered), validates that their schemas line up, melts each wide
//! table into long-form observations, left-joins deaths and recovered onto
//! confirmed, and derives per-region case records with an active-case metric.
//! From the records it builds the views a dashboard needs: global daily
//! totals, per-country series, the country list, and day-over-day deltas.
//!
//! Key capabilities:
//!
//! - **Concurrent fetching** of the three feeds behind a pluggable source
//!   boundary (HTTP or in-memory)
//! - **Schema validation** that accumulates every per-feed finding before
//!   failing
//! - **Order-preserving reshaping**: records come out in source row order
//! - **Atomic snapshot publication**, so readers keep a consistent dataset
//!   while a refresh runs

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod source;
pub mod transform;

// Re-export the pipeline entry points
pub use crate::config::PipelineConfig;
pub use crate::pipeline::Pipeline;

// Re-export the dataset and its row types
pub use crate::dataset::{CaseDataset, SnapshotStore};
pub use crate::models::{CaseRecord, DailyTotals, Metric, MetricDelta, Region};

// Re-export the source boundary
pub use crate::source::{FeedKind, FeedSource, HttpFeedSource, StaticFeedSource};

// Re-export error handling types
pub use crate::error::{PipelineError, Result};
