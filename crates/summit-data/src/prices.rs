//! Daily close-price histories.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Close price on that date.
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Close-price history for one instrument.
///
/// Dates are strictly increasing. Missing trading days are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Create a price history from points already in ascending date order.
    ///
    /// # Errors
    ///
    /// Returns an error if dates are not strictly increasing or a close is
    /// not a finite positive number.
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let ticker = ticker.into();

        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(DataError::InvalidClosePrice {
                    ticker,
                    date: point.date,
                    price: point.close,
                });
            }
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(DataError::UnorderedPrices {
                ticker,
                date: pair[1].date,
            });
        }

        Ok(Self { ticker, points })
    }

    /// Create a price history from points in any order.
    ///
    /// Duplicate dates are still rejected.
    pub fn from_unsorted(ticker: impl Into<String>, mut points: Vec<PricePoint>) -> Result<Self> {
        points.sort_by_key(|p| p.date);
        Self::new(ticker, points)
    }

    /// An empty history, used when no prices could be obtained.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            points: Vec::new(),
        }
    }

    /// Ticker this history belongs to.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// All observations in ascending date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no observations.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Close on a given date, if observed.
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].close)
    }

    /// Restrict the history to the half-open window `[start, end)`.
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let lo = self.points.partition_point(|p| p.date < start);
        let hi = self.points.partition_point(|p| p.date < end).max(lo);

        Self {
            ticker: self.ticker.clone(),
            points: self.points[lo..hi].to_vec(),
        }
    }
}
