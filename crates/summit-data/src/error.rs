//! Error types for data operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or validating instrument data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Shares outstanding must be strictly positive
    #[error("Invalid shares outstanding for {ticker}: {value}")]
    InvalidSharesOutstanding {
        /// Ticker of the instrument
        ticker: String,
        /// Offending value
        value: f64,
    },

    /// Split ratio must be strictly positive
    #[error("Invalid split ratio for {ticker} on {date}: {ratio}")]
    InvalidSplitRatio {
        /// Ticker of the instrument
        ticker: String,
        /// Effective date of the split
        date: NaiveDate,
        /// Offending ratio
        ratio: f64,
    },

    /// Two splits share an effective date
    #[error("Duplicate split for {ticker} on {date}")]
    DuplicateSplitDate {
        /// Ticker of the instrument
        ticker: String,
        /// Repeated effective date
        date: NaiveDate,
    },

    /// Close price must be finite and strictly positive
    #[error("Invalid close price for {ticker} on {date}: {price}")]
    InvalidClosePrice {
        /// Ticker of the instrument
        ticker: String,
        /// Date of the observation
        date: NaiveDate,
        /// Offending price
        price: f64,
    },

    /// The same ticker was supplied more than once
    #[error("Duplicate instrument for ticker {ticker}")]
    DuplicateTicker {
        /// Repeated ticker
        ticker: String,
    },

    /// Price dates must be strictly increasing
    #[error("Price dates for {ticker} are not strictly increasing at {date}")]
    UnorderedPrices {
        /// Ticker of the instrument
        ticker: String,
        /// First date out of order
        date: NaiveDate,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
