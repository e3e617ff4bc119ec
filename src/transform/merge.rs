//! Successive left joins of the three observation streams.
//!
//! Confirmed is the driving side: every confirmed observation produces
//! exactly one merged row, in input order. Deaths and recovered are indexed
//! by the full identity-plus-date key and looked up per confirmed row; keys
//! absent from a right side leave that count empty. Right-side observations
//! whose key never appears on the confirmed side are dropped.
//!
//! The join key covers subdivision, country, both coordinates, and the date.
//! Coordinates are compared by bit pattern, so two absent coordinates match
//! each other and `0.0`/`-0.0` are distinct keys.

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{PipelineError, Result};
use crate::models::Region;
use crate::source::FeedKind;
use crate::transform::Observation;

/// One confirmed observation joined with its deaths and recovered counts
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    /// Region identity from the confirmed side
    pub region: Region,
    /// Observation date
    pub date: NaiveDate,
    /// Confirmed count; `None` when the source cell was empty
    pub confirmed: Option<u64>,
    /// Deaths count; `None` when the key was absent or the cell empty
    pub deaths: Option<u64>,
    /// Recovered count; `None` when the key was absent or the cell empty
    pub recovered: Option<u64>,
}

/// Hashable identity-plus-date join key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct JoinKey {
    subdivision: Option<String>,
    country: String,
    latitude_bits: Option<u64>,
    longitude_bits: Option<u64>,
    date: NaiveDate,
}

impl JoinKey {
    fn new(region: &Region, date: NaiveDate) -> Self {
        Self {
            subdivision: region.subdivision.clone(),
            country: region.country.clone(),
            latitude_bits: region.latitude.map(f64::to_bits),
            longitude_bits: region.longitude.map(f64::to_bits),
            date,
        }
    }
}

/// Left-join deaths and recovered onto the confirmed observations
///
/// # Errors
/// Returns `PipelineError::MalformedFeed` when any feed repeats an
/// identity-plus-date key, and `PipelineError::Internal` when the output row
/// count does not match the confirmed input count.
pub fn left_join_feeds(
    confirmed: Vec<Observation>,
    deaths: Vec<Observation>,
    recovered: Vec<Observation>,
) -> Result<Vec<MergedRow>> {
    let confirmed_len = confirmed.len();
    let deaths_index = index_feed(FeedKind::Deaths, deaths)?;
    let recovered_index = index_feed(FeedKind::Recovered, recovered)?;

    let mut seen = FxHashSet::default();
    seen.reserve(confirmed_len);

    let mut missing_deaths = 0_usize;
    let mut missing_recovered = 0_usize;
    let mut merged = Vec::with_capacity(confirmed_len);

    for observation in confirmed {
        let key = JoinKey::new(&observation.region, observation.date);
        if !seen.insert(key.clone()) {
            return Err(duplicate_key(FeedKind::Confirmed, &key));
        }

        let deaths = match deaths_index.get(&key) {
            Some(value) => *value,
            None => {
                missing_deaths += 1;
                None
            }
        };
        let recovered = match recovered_index.get(&key) {
            Some(value) => *value,
            None => {
                missing_recovered += 1;
                None
            }
        };

        merged.push(MergedRow {
            region: observation.region,
            date: observation.date,
            confirmed: observation.value,
            deaths,
            recovered,
        });
    }

    if missing_deaths > 0 || missing_recovered > 0 {
        log::debug!(
            "left join: {missing_deaths} keys absent from deaths, {missing_recovered} absent from recovered"
        );
    }

    if merged.len() != confirmed_len {
        return Err(PipelineError::internal(format!(
            "merge produced {} rows from {confirmed_len} confirmed observations",
            merged.len()
        )));
    }

    Ok(merged)
}

/// Index one right-side feed by join key, rejecting duplicates
fn index_feed(
    feed: FeedKind,
    observations: Vec<Observation>,
) -> Result<FxHashMap<JoinKey, Option<u64>>> {
    let mut index = FxHashMap::default();
    index.reserve(observations.len());

    for observation in observations {
        let key = JoinKey::new(&observation.region, observation.date);
        if index.insert(key.clone(), observation.value).is_some() {
            return Err(duplicate_key(feed, &key));
        }
    }

    Ok(index)
}

fn duplicate_key(feed: FeedKind, key: &JoinKey) -> PipelineError {
    PipelineError::MalformedFeed {
        feed,
        detail: format!(
            "duplicate key: subdivision {:?}, country '{}', date {}",
            key.subdivision, key.country, key.date
        ),
    }
}
