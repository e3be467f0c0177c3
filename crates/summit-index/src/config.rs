//! Index run configuration.

use crate::error::{IndexError, Result};
use crate::weights::WeightPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of index constituents.
pub const DEFAULT_TOP_N: usize = 100;

/// Configuration for a single index run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Number of constituents selected per date.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Inclusive first date processed.
    pub start: NaiveDate,

    /// Exclusive last date processed.
    pub end: NaiveDate,

    /// How constituents are weighted.
    #[serde(default)]
    pub weighting: WeightPolicy,
}

const fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl IndexConfig {
    /// Create a configuration with slot-based equal weights.
    pub const fn new(top_n: usize, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            top_n,
            start,
            end,
            weighting: WeightPolicy::EqualBySlot,
        }
    }

    /// Set the weighting policy.
    pub const fn with_weighting(mut self, weighting: WeightPolicy) -> Self {
        self.weighting = weighting;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `top_n` is zero or `start` is not before `end`.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(IndexError::InvalidTopN(self.top_n));
        }
        if self.start >= self.end {
            return Err(IndexError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Whether `date` falls inside `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}
