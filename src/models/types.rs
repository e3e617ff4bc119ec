//! Common metric type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four case metrics tracked per region and date
///
/// Confirmed, deaths and recovered come straight from the feeds; active is
/// derived as `confirmed - deaths - recovered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cumulative confirmed cases
    Confirmed,
    /// Cumulative deaths
    Deaths,
    /// Cumulative recoveries
    Recovered,
    /// Derived active cases
    Active,
}

impl Metric {
    /// All metrics, in dataset column order
    pub const ALL: [Self; 4] = [Self::Confirmed, Self::Deaths, Self::Recovered, Self::Active];

    /// Stable lowercase column name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
            Self::Active => "active",
        }
    }

    /// Look up a metric by its column name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "confirmed" => Some(Self::Confirmed),
            "deaths" => Some(Self::Deaths),
            "recovered" => Some(Self::Recovered),
            "active" => Some(Self::Active),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
