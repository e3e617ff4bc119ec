//! Wide-to-long reshaping.
//!
//! Each wide table row holds one region and one value per date column. The
//! melt unpivots that into one observation per region and date, scanning
//! row-major so the output order is: all dates of the first region, then all
//! dates of the second, and so on. That order is what the merge preserves
//! into the final records.

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::Region;
use crate::schema;
use crate::source::WideTable;

/// One long-form observation: a region, a date, and that feed's count
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Region identity carried from the wide row
    pub region: Region,
    /// Observation date parsed from the column label
    pub date: NaiveDate,
    /// The feed's cumulative count; `None` when the source cell was empty
    pub value: Option<u64>,
}

/// Unpivot a wide table into long-form observations
///
/// Produces exactly `rows * date_columns` observations, row-major.
///
/// # Errors
/// Returns `PipelineError::UnparseableDate` when a date column label does not
/// match the configured format.
pub fn melt_table(table: &WideTable, config: &PipelineConfig) -> Result<Vec<Observation>> {
    let dates = schema::parse_date_labels(table, config)?;

    let mut observations = Vec::with_capacity(table.num_rows() * dates.len());
    for row in table.rows() {
        for (date, value) in dates.iter().zip(row.values.iter()) {
            observations.push(Observation {
                region: row.region.clone(),
                date: *date,
                value: *value,
            });
        }
    }

    log::debug!(
        "melted {} feed: {} rows x {} dates -> {} observations",
        table.feed(),
        table.num_rows(),
        dates.len(),
        observations.len()
    );

    Ok(observations)
}
