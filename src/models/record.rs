//! Per-region, per-date case records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic identity of one feed row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Province or state, when the country reports subdivisions
    pub subdivision: Option<String>,
    /// Country or region name
    pub country: String,
    /// Latitude, when the feed provides coordinates
    pub latitude: Option<f64>,
    /// Longitude, when the feed provides coordinates
    pub longitude: Option<f64>,
}

impl Region {
    /// Region identified by a country name alone
    #[must_use]
    pub fn country_only(country: impl Into<String>) -> Self {
        Self {
            subdivision: None,
            country: country.into(),
            latitude: None,
            longitude: None,
        }
    }
}

/// One row of the merged long-format dataset
///
/// Unique per (subdivision, country, date). `recovered` is always present:
/// feeds that stop reporting recoveries contribute zero. `active` is signed
/// because inconsistent source data can drive it negative, and such values
/// are surfaced rather than clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Geographic identity carried over from the feeds
    #[serde(flatten)]
    pub region: Region,
    /// Observation date
    pub date: NaiveDate,
    /// Cumulative confirmed cases
    pub confirmed: u64,
    /// Cumulative deaths
    pub deaths: u64,
    /// Cumulative recoveries
    pub recovered: u64,
    /// `confirmed - deaths - recovered`
    pub active: i64,
}
