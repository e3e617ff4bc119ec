//! Daily aggregation and day-over-day deltas.
//!
//! Aggregation sums the per-region records into one row per calendar date,
//! using a `BTreeMap` keyed by date so the output is always in ascending
//! chronological order regardless of record order.
//!
//! The delta compares the last two rows of an aggregated series. The percent
//! figure divides by the LATEST value, not the previous one, so it reads
//! "what share of today's total is new" rather than classic growth-over-
//! yesterday. That framing is kept as-is; see the note on [`delta`].

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{CaseRecord, DailyTotals, Metric, MetricDelta};

/// Sum all records into per-date global totals, ascending by date
#[must_use]
pub fn daily_totals(records: &[CaseRecord]) -> Vec<DailyTotals> {
    accumulate(records.iter())
}

/// Sum one country's records into per-date totals, ascending by date
///
/// Country names match exactly, the way they appear in the feeds.
#[must_use]
pub fn daily_totals_for_country(records: &[CaseRecord], country: &str) -> Vec<DailyTotals> {
    accumulate(records.iter().filter(|record| record.region.country == country))
}

fn accumulate<'a>(records: impl Iterator<Item = &'a CaseRecord>) -> Vec<DailyTotals> {
    let mut by_date: BTreeMap<NaiveDate, DailyTotals> = BTreeMap::new();

    for record in records {
        let totals = by_date
            .entry(record.date)
            .or_insert_with(|| DailyTotals::empty(record.date));
        totals.confirmed += record.confirmed;
        totals.deaths += record.deaths;
        totals.recovered += record.recovered;
        totals.active += record.active;
    }

    by_date.into_values().collect()
}

/// Day-over-day change of one metric at the end of an aggregated series
///
/// Returns `None` when the series has fewer than two rows. The percent field
/// is `(1 - previous / latest) * 100`, rounded to two decimals; it is `None`
/// when the latest total is zero and the ratio is undefined.
#[must_use]
pub fn delta(series: &[DailyTotals], metric: Metric) -> Option<MetricDelta> {
    if series.len() < 2 {
        log::debug!("delta for {metric} skipped: series has {} rows", series.len());
        return None;
    }

    let latest = series[series.len() - 1].total(metric);
    let previous = series[series.len() - 2].total(metric);
    let change = latest - previous;

    #[allow(clippy::cast_precision_loss)]
    let percent = if latest == 0 {
        None
    } else {
        Some(round2((1.0 - previous as f64 / latest as f64) * 100.0))
    };

    Some(MetricDelta {
        metric,
        latest,
        change,
        percent,
    })
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
