//! Data model for the merged dataset.
//!
//! These are the types the presentation layer consumes: long-format case
//! records, daily aggregate rows, and the derived trend deltas.

pub mod daily;
pub mod record;
pub mod types;

pub use daily::{DailyTotals, MetricDelta};
pub use record::{CaseRecord, Region};
pub use types::Metric;
