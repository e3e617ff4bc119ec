//! Daily aggregate rows and trend deltas.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::Metric;

/// Sum of every region's metrics for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    /// The date the totals cover
    pub date: NaiveDate,
    /// Confirmed cases across all regions
    pub confirmed: u64,
    /// Deaths across all regions
    pub deaths: u64,
    /// Recoveries across all regions
    pub recovered: u64,
    /// Active cases across all regions; signed like the per-region value
    pub active: i64,
}

impl DailyTotals {
    /// Empty totals row for a date
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            confirmed: 0,
            deaths: 0,
            recovered: 0,
            active: 0,
        }
    }

    /// Total for one metric, widened to a signed value
    #[must_use]
    pub const fn total(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Confirmed => self.confirmed as i64,
            Metric::Deaths => self.deaths as i64,
            Metric::Recovered => self.recovered as i64,
            Metric::Active => self.active,
        }
    }
}

/// Day-over-day movement of one metric between the two most recent dates
///
/// Derived on demand from a daily series, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    /// The metric the delta describes
    pub metric: Metric,
    /// Total on the latest date
    pub latest: i64,
    /// Latest total minus the previous day's total
    pub change: i64,
    /// Change as a percentage of the latest total, rounded to two decimals;
    /// absent when the latest total is zero
    pub percent: Option<f64>,
}
