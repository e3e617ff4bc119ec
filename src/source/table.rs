//! Wide-format table decoding.
//!
//! Each feed arrives as a CSV whose leading columns identify a region and
//! whose remaining columns are one cumulative count per date. The decoder
//! splits the header positionally: the configured identity block comes first,
//! everything after it is a date column. Header labels are kept verbatim here;
//! parsing and ordering of the date labels is schema validation's job.

use csv::{ReaderBuilder, Trim};

use crate::error::{PipelineError, Result};
use crate::models::Region;
use crate::source::FeedKind;

/// One decoded region row: identity plus one optional count per date column
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    /// Region identity from the leading columns
    pub region: Region,
    /// One value per date column, in header order; `None` for empty cells
    pub values: Vec<Option<u64>>,
}

/// A decoded wide-format feed table
#[derive(Debug, Clone)]
pub struct WideTable {
    feed: FeedKind,
    identity_headers: Vec<String>,
    date_labels: Vec<String>,
    rows: Vec<WideRow>,
}

impl WideTable {
    /// Decode a CSV body into a wide table
    ///
    /// The first `identity_len` header columns form the identity block and the
    /// rest are taken as date columns. Region identity is read from the first
    /// four identity cells (subdivision, country, latitude, longitude); count
    /// cells must be empty or non-negative integers.
    ///
    /// # Arguments
    /// * `feed` - Which feed this body belongs to, used in error reports
    /// * `body` - The raw CSV text
    /// * `identity_len` - Number of leading identity columns
    ///
    /// # Errors
    /// Returns `PipelineError::MalformedFeed` when the body is not valid CSV,
    /// the header is shorter than the identity block, or a count cell cannot
    /// be parsed.
    pub fn from_csv(feed: FeedKind, body: &str, identity_len: usize) -> Result<Self> {
        // Some upstream exports lead with a UTF-8 byte-order mark.
        let body = body.trim_start_matches('\u{feff}');

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| PipelineError::MalformedFeed {
                feed,
                detail: format!("unreadable header row: {e}"),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.len() < identity_len {
            return Err(PipelineError::MalformedFeed {
                feed,
                detail: format!(
                    "header has {} columns but {identity_len} identity columns are required",
                    headers.len()
                ),
            });
        }

        let identity_headers = headers[..identity_len].to_vec();
        let date_labels = headers[identity_len..].to_vec();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| PipelineError::MalformedFeed {
                feed,
                detail: format!("row {}: {e}", index + 1),
            })?;

            let region = Region {
                subdivision: optional_text(record.get(0)),
                country: record.get(1).unwrap_or_default().to_string(),
                latitude: parse_coordinate(record.get(2)),
                longitude: parse_coordinate(record.get(3)),
            };

            let mut values = Vec::with_capacity(date_labels.len());
            for (offset, label) in date_labels.iter().enumerate() {
                let cell = record.get(identity_len + offset).unwrap_or_default();
                values.push(parse_count(cell).map_err(|detail| {
                    PipelineError::MalformedFeed {
                        feed,
                        detail: format!("row {}, column '{label}': {detail}", index + 1),
                    }
                })?);
            }

            rows.push(WideRow { region, values });
        }

        log::debug!(
            "decoded {feed} feed: {} rows, {} date columns",
            rows.len(),
            date_labels.len()
        );

        Ok(Self {
            feed,
            identity_headers,
            date_labels,
            rows,
        })
    }

    /// Which feed this table was decoded from
    #[must_use]
    pub const fn feed(&self) -> FeedKind {
        self.feed
    }

    /// Header names of the identity block, in column order
    #[must_use]
    pub fn identity_headers(&self) -> &[String] {
        &self.identity_headers
    }

    /// Date column labels, in column order, verbatim from the header
    #[must_use]
    pub fn date_labels(&self) -> &[String] {
        &self.date_labels
    }

    /// Decoded region rows
    #[must_use]
    pub fn rows(&self) -> &[WideRow] {
        &self.rows
    }

    /// Number of region rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Empty cells become `None`, anything else is kept as-is
fn optional_text(cell: Option<&str>) -> Option<String> {
    match cell {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => None,
    }
}

/// Coordinates are carried opaquely; unparseable or non-finite cells become
/// `None` rather than failing the feed.
fn parse_coordinate(cell: Option<&str>) -> Option<f64> {
    let text = cell?;
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            log::debug!("ignoring unparseable coordinate cell '{text}'");
            None
        }
    }
}

/// Parse one count cell: empty means absent, otherwise a non-negative integer
///
/// Upstream exports occasionally write counts with a trailing `.0`; those are
/// accepted when the fractional part is zero.
fn parse_count(cell: &str) -> std::result::Result<Option<u64>, String> {
    if cell.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = cell.parse::<u64>() {
        return Ok(Some(value));
    }
    if let Ok(value) = cell.parse::<f64>() {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return Ok(Some(value as u64));
        }
    }
    Err(format!("expected a non-negative count, found '{cell}'"))
}
