//! Schema validation for the decoded feed tables.
//!
//! Before any reshaping, the three wide tables are checked against the
//! configured identity block and against each other. Per-table checks: the
//! identity header names match the configuration, at least one date column is
//! present, every date label parses, and the parsed dates are strictly
//! ascending. Cross-table checks: deaths and recovered carry exactly the same
//! date labels as confirmed.
//!
//! Issues are accumulated into a [`SchemaReport`] rather than failing on the
//! first finding, so one run reports everything that is wrong. Unparseable
//! date labels are the exception: nothing downstream can proceed without
//! parsed dates, so those fail immediately.

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::source::{FeedKind, RawTables, WideTable};

/// A single schema finding on one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Feed the issue was found on
    pub feed: FeedKind,
    /// Human-readable description of the finding
    pub description: String,
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.feed, self.description)
    }
}

/// Outcome of validating the three feed schemas
#[derive(Debug, Clone, Default)]
pub struct SchemaReport {
    /// All findings, in check order
    pub issues: Vec<SchemaIssue>,
}

impl SchemaReport {
    /// Whether the feeds can be merged
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.issues.is_empty()
    }

    /// Record one finding
    pub fn add_issue(&mut self, feed: FeedKind, description: impl Into<String>) {
        self.issues.push(SchemaIssue {
            feed,
            description: description.into(),
        });
    }

    /// Convert an incompatible report into a `SchemaMismatch` error
    ///
    /// # Errors
    /// Returns `PipelineError::SchemaMismatch` carrying every accumulated
    /// issue when the report is incompatible.
    pub fn into_result(self) -> Result<Self> {
        if self.is_compatible() {
            Ok(self)
        } else {
            Err(PipelineError::SchemaMismatch {
                issues: self.issues,
            })
        }
    }
}

/// Parse one date column label with the configured format
///
/// # Errors
/// Returns `PipelineError::UnparseableDate` naming the offending label and
/// where it was seen.
pub fn parse_date_label(label: &str, format: &str, context: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(label, format).map_err(|_| PipelineError::UnparseableDate {
        context: context.to_string(),
        value: label.to_string(),
    })
}

/// Parse every date label of one table, in column order
///
/// # Errors
/// Returns `PipelineError::UnparseableDate` on the first label that does not
/// match the configured format.
pub fn parse_date_labels(table: &WideTable, config: &PipelineConfig) -> Result<Vec<NaiveDate>> {
    let context = format!("{} feed header", table.feed());
    table
        .date_labels()
        .iter()
        .map(|label| parse_date_label(label, &config.date_label_format, &context))
        .collect()
}

/// Validate the three decoded tables against the configuration and each other
///
/// # Errors
/// Returns `PipelineError::UnparseableDate` when a date label cannot be
/// parsed at all. Structural findings are accumulated into the report
/// instead; call [`SchemaReport::into_result`] to turn them into an error.
pub fn check_feed_schemas(raw: &RawTables, config: &PipelineConfig) -> Result<SchemaReport> {
    let mut report = SchemaReport::default();

    for table in raw.tables() {
        check_identity_headers(table, config, &mut report);
        check_date_columns(table, config, &mut report)?;
    }

    check_label_alignment(raw, &mut report);

    if report.is_compatible() {
        log::debug!(
            "feed schemas validated: {} identity columns, {} date columns",
            config.identity_len(),
            raw.confirmed.date_labels().len()
        );
    } else {
        for issue in &report.issues {
            log::warn!("schema issue: {issue}");
        }
    }

    Ok(report)
}

fn check_identity_headers(table: &WideTable, config: &PipelineConfig, report: &mut SchemaReport) {
    let found = table.identity_headers();
    if found.len() < config.identity_len() {
        report.add_issue(
            table.feed(),
            format!(
                "identity block has {} columns, expected {}",
                found.len(),
                config.identity_len()
            ),
        );
        return;
    }

    for (position, (found, expected)) in
        found.iter().zip(config.identity_headers.iter()).enumerate()
    {
        if found != expected {
            report.add_issue(
                table.feed(),
                format!("identity column {position} is '{found}', expected '{expected}'"),
            );
        }
    }
}

fn check_date_columns(
    table: &WideTable,
    config: &PipelineConfig,
    report: &mut SchemaReport,
) -> Result<()> {
    if table.date_labels().is_empty() {
        report.add_issue(table.feed(), "has no date columns");
        return Ok(());
    }

    let dates = parse_date_labels(table, config)?;
    for (window, labels) in dates.windows(2).zip(table.date_labels().windows(2)) {
        if window[1] <= window[0] {
            report.add_issue(
                table.feed(),
                format!("date column '{}' is not after '{}'", labels[1], labels[0]),
            );
        }
    }

    Ok(())
}

/// Deaths and recovered must carry exactly the confirmed feed's date labels
fn check_label_alignment(raw: &RawTables, report: &mut SchemaReport) {
    let reference = raw.confirmed.date_labels();
    for table in [&raw.deaths, &raw.recovered] {
        let labels = table.date_labels();
        if labels == reference {
            continue;
        }
        if labels.len() != reference.len() {
            report.add_issue(
                table.feed(),
                format!(
                    "has {} date columns, confirmed has {}",
                    labels.len(),
                    reference.len()
                ),
            );
        } else if let Some((position, (found, expected))) = labels
            .iter()
            .zip(reference.iter())
            .enumerate()
            .find(|(_, (found, expected))| found != expected)
        {
            report.add_issue(
                table.feed(),
                format!(
                    "date column {position} is '{found}', confirmed has '{expected}'"
                ),
            );
        }
    }
}
