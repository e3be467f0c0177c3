//! Error types for index construction.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Run-level errors. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index must hold at least one constituent
    #[error("Invalid top-N size: {0} (must be at least 1)")]
    InvalidTopN(usize),

    /// The processing window is empty
    #[error("Invalid date range: start {start} is not before end {end}")]
    InvalidDateRange {
        /// Inclusive start of the window
        start: NaiveDate,
        /// Exclusive end of the window
        end: NaiveDate,
    },
}
