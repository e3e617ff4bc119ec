//! Final record derivation.
//!
//! Resolves the optional counts left by the join and computes the active
//! metric. Recovered counts are routinely absent (the recovered feed stopped
//! tracking some regions) and default to zero quietly. Absent confirmed or
//! deaths counts also default to zero but are counted and logged, since they
//! indicate feed gaps rather than expected sparsity.
//!
//! `active = confirmed - deaths - recovered`, computed in signed arithmetic
//! and deliberately never clamped: upstream revisions can push recoveries
//! past confirmed cases, and a negative active count preserves that signal.

use crate::models::CaseRecord;
use crate::transform::MergedRow;

/// Resolve missing counts and derive the active metric for every merged row
///
/// Output order matches input order.
#[must_use]
pub fn finalize_records(rows: Vec<MergedRow>) -> Vec<CaseRecord> {
    let mut absent_confirmed = 0_usize;
    let mut absent_deaths = 0_usize;
    let mut absent_recovered = 0_usize;

    let records: Vec<CaseRecord> = rows
        .into_iter()
        .map(|row| {
            let confirmed = resolve(row.confirmed, &mut absent_confirmed);
            let deaths = resolve(row.deaths, &mut absent_deaths);
            let recovered = resolve(row.recovered, &mut absent_recovered);

            #[allow(clippy::cast_possible_wrap)]
            let active = confirmed as i64 - deaths as i64 - recovered as i64;

            CaseRecord {
                region: row.region,
                date: row.date,
                confirmed,
                deaths,
                recovered,
                active,
            }
        })
        .collect();

    if absent_recovered > 0 {
        log::debug!("filled {absent_recovered} absent recovered counts with zero");
    }
    if absent_confirmed > 0 || absent_deaths > 0 {
        log::warn!(
            "filled {absent_confirmed} absent confirmed and {absent_deaths} absent deaths counts with zero"
        );
    }

    records
}

fn resolve(value: Option<u64>, absent: &mut usize) -> u64 {
    value.unwrap_or_else(|| {
        *absent += 1;
        0
    })
}
