//! As-of-date index summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use summit_index::IndexRun;

/// Headline figures of an index run on a single date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexSummary {
    /// Date the summary describes.
    pub as_of: NaiveDate,

    /// Index level on that date, 0.0 if the index has no value then.
    pub cumulative_value: f64,

    /// Index return on that date, 0.0 if the index has no value then.
    pub daily_return: f64,

    /// Number of composition changes over the whole run.
    pub total_changes: usize,

    /// Number of constituents on that date.
    pub constituents: usize,
}

impl IndexSummary {
    /// Summarize `run` on `date`, or on its latest date when `date` is `None`.
    ///
    /// Returns `None` only when no date is given and the run is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use summit_index::{IndexConfig, IndexEngine};
    /// use summit_output::IndexSummary;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    /// let engine = IndexEngine::new(IndexConfig::new(10, start, end)).unwrap();
    /// let (run, _) = engine.run(&[]);
    ///
    /// assert!(IndexSummary::as_of(&run, None).is_none());
    /// let summary = IndexSummary::as_of(&run, Some(start)).unwrap();
    /// assert_eq!(summary.cumulative_value, 0.0);
    /// ```
    pub fn as_of(run: &IndexRun, date: Option<NaiveDate>) -> Option<Self> {
        let as_of = date.or_else(|| run.latest_date())?;

        let (cumulative_value, daily_return) = run
            .performance_on(as_of)
            .map_or((0.0, 0.0), |p| (p.cumulative_value, p.daily_return));

        Some(Self {
            as_of,
            cumulative_value,
            daily_return,
            total_changes: run.changes.len(),
            constituents: run.composition.on(as_of).map_or(0, |d| d.members.len()),
        })
    }

    /// Return since inception, `cumulative_value - 1`.
    pub fn total_return(&self) -> f64 {
        if self.cumulative_value == 0.0 {
            0.0
        } else {
            self.cumulative_value - 1.0
        }
    }
}

impl fmt::Display for IndexSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "As of:             {}", self.as_of)?;
        writeln!(f, "Cumulative Return: {:.2}", self.cumulative_value)?;
        writeln!(f, "Daily Change:      {:.2}%", self.daily_return * 100.0)?;
        writeln!(f, "Total Changes:     {}", self.total_changes)?;
        write!(f, "Constituents:      {}", self.constituents)
    }
}
