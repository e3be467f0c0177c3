//! Stock split events.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A forward or reverse split.
///
/// `ratio` is new shares per old share: 2.0 for a 2-for-1 split, 0.5 for a
/// 1-for-2 reverse split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitEvent {
    /// Date the split takes effect.
    pub effective_date: NaiveDate,
    /// New shares per old share.
    pub ratio: f64,
}

impl SplitEvent {
    /// Create a new split event.
    pub const fn new(effective_date: NaiveDate, ratio: f64) -> Self {
        Self {
            effective_date,
            ratio,
        }
    }
}

/// Validated split history of one instrument, ascending by effective date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitHistory {
    events: Vec<SplitEvent>,
}

impl SplitHistory {
    /// Build a split history, sorting events by effective date.
    ///
    /// # Errors
    ///
    /// Returns an error if any ratio is not a finite positive number or two
    /// events share an effective date.
    pub fn new(ticker: &str, mut events: Vec<SplitEvent>) -> Result<Self> {
        if let Some(bad) = events
            .iter()
            .find(|e| !e.ratio.is_finite() || e.ratio <= 0.0)
        {
            return Err(DataError::InvalidSplitRatio {
                ticker: ticker.to_string(),
                date: bad.effective_date,
                ratio: bad.ratio,
            });
        }

        events.sort_by_key(|e| e.effective_date);

        if let Some(pair) = events
            .windows(2)
            .find(|w| w[0].effective_date == w[1].effective_date)
        {
            return Err(DataError::DuplicateSplitDate {
                ticker: ticker.to_string(),
                date: pair[0].effective_date,
            });
        }

        Ok(Self { events })
    }

    /// Events in ascending effective-date order.
    pub fn events(&self) -> &[SplitEvent] {
        &self.events
    }

    /// Number of split events.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the history has no splits.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
