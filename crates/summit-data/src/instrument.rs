//! Per-instrument input bundle.

use crate::error::{DataError, Result};
use crate::prices::PriceHistory;
use crate::splits::{SplitEvent, SplitHistory};
use serde::{Deserialize, Serialize};

/// Latest reported total shares outstanding, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SharesOutstanding(f64);

impl SharesOutstanding {
    /// Validate a shares-outstanding figure.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidSharesOutstanding`] for zero, negative or
    /// non-finite values.
    pub fn new(ticker: &str, value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DataError::InvalidSharesOutstanding {
                ticker: ticker.to_string(),
                value,
            });
        }
        Ok(Self(value))
    }

    /// The raw share count.
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Everything the index engine needs about one instrument.
///
/// Raw figures are kept unvalidated so that validation failures stay scoped
/// to this instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentData {
    /// Ticker symbol.
    pub ticker: String,
    /// Company name, falls back to the ticker.
    pub company_name: String,
    /// Daily close prices.
    pub prices: PriceHistory,
    /// Latest shares outstanding, `None` when the source had no figure.
    pub shares_outstanding: Option<f64>,
    /// Split events in any order.
    pub splits: Vec<SplitEvent>,
}

impl InstrumentData {
    /// Create an instrument with no splits.
    pub fn new(
        ticker: impl Into<String>,
        company_name: impl Into<String>,
        prices: PriceHistory,
        shares_outstanding: Option<f64>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
            prices,
            shares_outstanding,
            splits: Vec::new(),
        }
    }

    /// Attach split events.
    pub fn with_splits(mut self, splits: Vec<SplitEvent>) -> Self {
        self.splits = splits;
        self
    }

    /// Validated shares figure, `Ok(None)` when the source had none.
    pub fn validated_shares(&self) -> Result<Option<SharesOutstanding>> {
        self.shares_outstanding
            .map(|v| SharesOutstanding::new(&self.ticker, v))
            .transpose()
    }

    /// Validated split history.
    pub fn split_history(&self) -> Result<SplitHistory> {
        SplitHistory::new(&self.ticker, self.splits.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_shares_validation() {
        assert!(SharesOutstanding::new("AAPL", 1_000_000.0).is_ok());
        assert!(SharesOutstanding::new("AAPL", 0.0).is_err());
        assert!(SharesOutstanding::new("AAPL", -5.0).is_err());
        assert!(SharesOutstanding::new("AAPL", f64::NAN).is_err());
    }

    #[test]
    fn test_validated_shares_absent() {
        let instrument = InstrumentData::new("AAPL", "Apple Inc.", PriceHistory::empty("AAPL"), None);
        assert_eq!(instrument.validated_shares().unwrap(), None);
    }

    #[test]
    fn test_split_history_from_instrument() {
        let date = NaiveDate::from_ymd_opt(2020, 8, 31).unwrap();
        let instrument = InstrumentData::new("AAPL", "Apple Inc.", PriceHistory::empty("AAPL"), Some(1e9))
            .with_splits(vec![SplitEvent::new(date, 4.0)]);

        let history = instrument.split_history().unwrap();
        assert_eq!(history.events()[0].ratio, 4.0);
        assert_eq!(instrument.validated_shares().unwrap().unwrap().get(), 1e9);
    }
}
