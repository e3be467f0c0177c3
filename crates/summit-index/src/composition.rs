//! Daily index composition.

use crate::market_cap::MarketCapRecord;
use crate::weights::{ConstituentSnapshot, WeightPolicy, assign_weights};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The weighted constituents of the index on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyConstituents {
    /// Trading date.
    pub date: NaiveDate,
    /// Constituents in rank order.
    pub members: Vec<ConstituentSnapshot>,
}

impl DailyConstituents {
    /// Ticker set of this date.
    pub fn tickers(&self) -> BTreeSet<String> {
        self.members.iter().map(|m| m.ticker.clone()).collect()
    }

    /// Sum of member weights.
    pub fn total_weight(&self) -> f64 {
        self.members.iter().map(|m| m.weight).sum()
    }
}

/// Index composition over a run, in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    days: Vec<DailyConstituents>,
}

impl Composition {
    /// Weight a per-date selection into a composition.
    pub fn assemble(
        selection: BTreeMap<NaiveDate, Vec<&MarketCapRecord>>,
        top_n: usize,
        policy: WeightPolicy,
    ) -> Self {
        let days = selection
            .into_iter()
            .filter(|(_, selected)| !selected.is_empty())
            .map(|(date, selected)| DailyConstituents {
                date,
                members: assign_weights(&selected, top_n, policy),
            })
            .collect();

        Self { days }
    }

    /// Composition of each date in ascending order.
    pub fn days(&self) -> &[DailyConstituents] {
        &self.days
    }

    /// Composition on a specific date.
    pub fn on(&self, date: NaiveDate) -> Option<&DailyConstituents> {
        self.days
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|i| &self.days[i])
    }

    /// All constituent rows, ordered by date then rank.
    pub fn rows(&self) -> impl Iterator<Item = &ConstituentSnapshot> {
        self.days.iter().flat_map(|d| d.members.iter())
    }

    /// `(date, ticker set)` pairs in ascending date order.
    pub fn ticker_sets(&self) -> impl Iterator<Item = (NaiveDate, BTreeSet<String>)> + '_ {
        self.days.iter().map(|d| (d.date, d.tickers()))
    }

    /// Number of dates with constituents.
    pub const fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no date has constituents.
    pub const fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
