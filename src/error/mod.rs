//! Error handling for the feed pipeline.
//!
//! Every fatal condition aborts the pipeline run it occurred in; callers that
//! hold an earlier snapshot keep serving it. Absent trend deltas are not
//! errors and never appear here; they are `Option` results at the lookup.

use crate::schema::SchemaIssue;
use crate::source::FeedKind;

/// Specialized error type for pipeline runs
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A source feed could not be fetched
    #[error("feed '{feed}' unavailable: {reason}")]
    FeedUnavailable {
        /// The feed whose fetch failed
        feed: FeedKind,
        /// Transport-level cause
        reason: String,
    },

    /// A feed body could not be decoded into a wide table
    #[error("feed '{feed}' is malformed: {detail}")]
    MalformedFeed {
        /// The feed whose body failed to decode
        feed: FeedKind,
        /// What was wrong with the body
        detail: String,
    },

    /// The three wide tables do not agree structurally
    #[error("schema mismatch across feeds: {}", summarize_issues(.issues))]
    SchemaMismatch {
        /// Every structural problem found during validation
        issues: Vec<SchemaIssue>,
    },

    /// A date label could not be parsed with the configured format
    #[error("unparseable date '{value}' in {context}")]
    UnparseableDate {
        /// Where the label was encountered
        context: String,
        /// The offending label
        value: String,
    },

    /// Invalid pipeline configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// A pipeline invariant was violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Configuration error from any displayable cause
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// Internal invariant violation
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}

fn summarize_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
