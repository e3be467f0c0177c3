//! Day-over-day composition changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tickers that entered and left the index on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionChange {
    /// Date of the change.
    pub date: NaiveDate,
    /// Tickers present today but not on the previous date.
    pub added: BTreeSet<String>,
    /// Tickers present on the previous date but not today.
    pub removed: BTreeSet<String>,
}

impl CompositionChange {
    /// Diff two ticker sets, `None` when they are equal.
    pub fn between(
        date: NaiveDate,
        previous: &BTreeSet<String>,
        current: &BTreeSet<String>,
    ) -> Option<Self> {
        let added: BTreeSet<String> = current.difference(previous).cloned().collect();
        let removed: BTreeSet<String> = previous.difference(current).cloned().collect();

        if added.is_empty() && removed.is_empty() {
            None
        } else {
            Some(Self {
                date,
                added,
                removed,
            })
        }
    }

    /// Number of additions.
    pub fn additions(&self) -> usize {
        self.added.len()
    }

    /// Number of removals.
    pub fn removals(&self) -> usize {
        self.removed.len()
    }

    /// Added tickers joined with `", "`.
    pub fn added_joined(&self) -> String {
        join(&self.added)
    }

    /// Removed tickers joined with `", "`.
    pub fn removed_joined(&self) -> String {
        join(&self.removed)
    }
}

fn join(tickers: &BTreeSet<String>) -> String {
    tickers.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Scan ordered `(date, tickers)` snapshots and emit a change for every date
/// whose set differs from the previous snapshot's.
///
/// Empty snapshots are skipped. The first non-empty snapshot only seeds the
/// state and never produces a change.
pub fn track_changes<I>(snapshots: I) -> Vec<CompositionChange>
where
    I: IntoIterator<Item = (NaiveDate, BTreeSet<String>)>,
{
    snapshots
        .into_iter()
        .filter(|(_, tickers)| !tickers.is_empty())
        .scan(None::<BTreeSet<String>>, |previous, (date, current)| {
            let change = previous
                .as_ref()
                .and_then(|prev| CompositionChange::between(date, prev, &current));
            *previous = Some(current);
            Some(change)
        })
        .flatten()
        .collect()
}
