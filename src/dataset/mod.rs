//! The assembled dataset and its published snapshot.
//!
//! [`CaseDataset`] is one fully processed pass over the feeds: the per-region
//! records plus the views derived from them (global daily totals, the country
//! list, latest-day deltas). It is immutable once built.
//!
//! [`SnapshotStore`] holds the dataset readers see. A refresh builds a whole
//! new dataset and swaps it in atomically; a failed refresh never disturbs
//! the published one.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;

use crate::aggregate;
use crate::models::{CaseRecord, DailyTotals, Metric, MetricDelta};

/// One processed pass over the three feeds
#[derive(Debug, Clone)]
pub struct CaseDataset {
    records: Vec<CaseRecord>,
    daily: Vec<DailyTotals>,
    countries: Vec<String>,
    refreshed_at: DateTime<Utc>,
}

impl CaseDataset {
    /// Build a dataset from finalized records, computing the derived views
    #[must_use]
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        let daily = aggregate::daily_totals(&records);
        let countries: Vec<String> = records
            .iter()
            .map(|record| record.region.country.clone())
            .sorted()
            .dedup()
            .collect();

        Self {
            records,
            daily,
            countries,
            refreshed_at: Utc::now(),
        }
    }

    /// All per-region records, in source order
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Global daily totals, ascending by date
    #[must_use]
    pub fn daily_totals(&self) -> &[DailyTotals] {
        &self.daily
    }

    /// One country's records, in source order
    #[must_use]
    pub fn records_for_country(&self, country: &str) -> Vec<&CaseRecord> {
        self.records
            .iter()
            .filter(|record| record.region.country == country)
            .collect()
    }

    /// One country's daily totals, ascending by date
    #[must_use]
    pub fn daily_totals_for_country(&self, country: &str) -> Vec<DailyTotals> {
        aggregate::daily_totals_for_country(&self.records, country)
    }

    /// Distinct country names, sorted
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Most recent date covered by the feeds
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.daily.last().map(|totals| totals.date)
    }

    /// Global totals of the most recent date
    #[must_use]
    pub fn latest_totals(&self) -> Option<&DailyTotals> {
        self.daily.last()
    }

    /// Day-over-day delta of one metric, when the series allows it
    #[must_use]
    pub fn delta(&self, metric: Metric) -> Option<MetricDelta> {
        aggregate::delta(&self.daily, metric)
    }

    /// Day-over-day deltas of every metric that has one
    #[must_use]
    pub fn latest_deltas(&self) -> Vec<MetricDelta> {
        Metric::ALL
            .iter()
            .filter_map(|metric| self.delta(*metric))
            .collect()
    }

    /// When this dataset was built
    #[must_use]
    pub const fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// Whether the dataset holds any records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Atomically replaceable published dataset
///
/// Readers get an `Arc` to whatever dataset was last published and can keep
/// using it while a newer one is swapped in.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<CaseDataset>>>,
}

impl SnapshotStore {
    /// Create an empty store with nothing published yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a dataset, replacing the previous one
    pub fn publish(&self, dataset: Arc<CaseDataset>) {
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(dataset);
    }

    /// The currently published dataset, if any
    #[must_use]
    pub fn current(&self) -> Option<Arc<CaseDataset>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
