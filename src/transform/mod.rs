//! Reshaping and combination of the decoded feeds.
//!
//! Three steps, in order:
//! 1. [`melt`] turns each wide table into long-form observations, one row per
//!    region and date.
//! 2. [`merge`] left-joins the deaths and recovered observations onto the
//!    confirmed observations over the full identity-plus-date key.
//! 3. [`derive`] resolves missing counts and computes the active metric,
//!    producing the final case records.

pub mod derive;
pub mod melt;
pub mod merge;

pub use derive::finalize_records;
pub use melt::{Observation, melt_table};
pub use merge::{MergedRow, left_join_feeds};
