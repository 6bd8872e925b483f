//! Fatal failure taxonomy for the cleaning pipeline.
//!
//! Every stage either fully succeeds and hands a table to the next stage or
//! the whole run aborts with the first error encountered. There is no
//! per-row recovery; rows are only ever removed by the defined filters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanseError {
    /// Input file absent, unreadable, or structurally malformed
    /// (inconsistent column counts per row included).
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    /// Two distinct headers collapse to the same normalized name.
    #[error("columns '{left}' and '{right}' both normalize to '{normalized}'")]
    NameCollision {
        left: String,
        right: String,
        normalized: String,
    },

    /// A statistic required for imputation is undefined.
    #[error("cannot impute column '{column}': median of an empty population is undefined")]
    EmptyMedian { column: String },

    /// Output file could not be created, written, or persisted.
    #[error("failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}
