//! Split-adjusted shares outstanding.
//!
//! The reported share count is observed today, after every recorded split.
//! To recover the count on a historical date, divide it by the product of
//! all split ratios that took effect after that date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use summit_data::{SharesOutstanding, SplitHistory};

/// Effective shares outstanding on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharesPoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Shares outstanding as of that date.
    pub shares: f64,
}

/// Precomputed split divisors for one instrument.
#[derive(Debug, Clone)]
pub struct SplitAdjuster {
    dates: Vec<NaiveDate>,
    // suffix[i] = product of ratios of splits i..n
    suffix: Vec<f64>,
}

impl SplitAdjuster {
    /// Build the adjuster from a validated split history.
    pub fn new(splits: &SplitHistory) -> Self {
        let events = splits.events();
        let mut suffix = vec![1.0; events.len()];
        let mut running = 1.0;
        for (i, event) in events.iter().enumerate().rev() {
            running *= event.ratio;
            suffix[i] = running;
        }

        Self {
            dates: events.iter().map(|e| e.effective_date).collect(),
            suffix,
        }
    }

    /// Divisor that takes today's share count back to `date`.
    ///
    /// A split dated exactly on `date` has already happened.
    pub fn divisor_on(&self, date: NaiveDate) -> f64 {
        let next = self.dates.partition_point(|d| *d <= date);
        self.suffix.get(next).copied().unwrap_or(1.0)
    }
}

/// Project `shares` onto each of `target_dates`.
///
/// Returns one point per target date, in the same order.
pub fn effective_shares(
    shares: SharesOutstanding,
    splits: &SplitHistory,
    target_dates: &[NaiveDate],
) -> Vec<SharesPoint> {
    if splits.is_empty() {
        return target_dates
            .iter()
            .map(|&date| SharesPoint {
                date,
                shares: shares.get(),
            })
            .collect();
    }

    let adjuster = SplitAdjuster::new(splits);
    target_dates
        .iter()
        .map(|&date| SharesPoint {
            date,
            shares: shares.get() / adjuster.divisor_on(date),
        })
        .collect()
}
