//! Index returns and cumulative performance.
//!
//! An instrument's return on a date is measured against its own previous
//! observation, which may predate its time in the index. The first
//! observation has no return and contributes nothing to the index.

use crate::composition::Composition;
use crate::market_cap::MarketCapSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Return of one instrument over one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PeriodReturn {
    /// First observation, no prior price to compare against.
    Initial,
    /// `price / previous_price - 1`.
    Observed(f64),
}

impl PeriodReturn {
    /// Contribution to the weighted index return. `Initial` counts as zero.
    pub const fn contribution(self) -> f64 {
        match self {
            Self::Initial => 0.0,
            Self::Observed(r) => r,
        }
    }
}

/// Per-instrument period returns keyed by ticker and date.
#[derive(Debug, Clone, Default)]
pub struct ReturnTable {
    returns: HashMap<String, BTreeMap<NaiveDate, PeriodReturn>>,
}

impl ReturnTable {
    /// Compute returns from the close prices carried by a market-cap series.
    pub fn from_series(series: &MarketCapSeries) -> Self {
        let mut closes: HashMap<&str, Vec<(NaiveDate, f64)>> = HashMap::new();
        for record in series.records() {
            closes
                .entry(record.ticker.as_str())
                .or_default()
                .push((record.date, record.close_price));
        }

        let returns = closes
            .into_iter()
            .map(|(ticker, prices)| {
                let mut by_date = BTreeMap::new();
                let mut previous: Option<f64> = None;
                for (date, close) in prices {
                    let period = previous.map_or(PeriodReturn::Initial, |prev| {
                        PeriodReturn::Observed(close / prev - 1.0)
                    });
                    by_date.insert(date, period);
                    previous = Some(close);
                }
                (ticker.to_string(), by_date)
            })
            .collect();

        Self { returns }
    }

    /// Record a return directly.
    pub fn insert(&mut self, ticker: impl Into<String>, date: NaiveDate, period: PeriodReturn) {
        self.returns
            .entry(ticker.into())
            .or_default()
            .insert(date, period);
    }

    /// Return of `ticker` on `date`, `Initial` if never observed.
    pub fn get(&self, ticker: &str, date: NaiveDate) -> PeriodReturn {
        self.returns
            .get(ticker)
            .and_then(|by_date| by_date.get(&date))
            .copied()
            .unwrap_or(PeriodReturn::Initial)
    }
}

/// Index performance on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPerformanceRecord {
    /// Trading date.
    pub date: NaiveDate,
    /// Weighted sum of constituent returns.
    pub daily_return: f64,
    /// Index level, compounded from 1.0 before the first date.
    pub cumulative_value: f64,
}

/// Compute the daily index return and compounded level for every date of
/// the composition.
pub fn compute_performance(
    composition: &Composition,
    returns: &ReturnTable,
) -> Vec<IndexPerformanceRecord> {
    composition
        .days()
        .iter()
        .scan(1.0_f64, |level, day| {
            let daily_return: f64 = day
                .members
                .iter()
                .map(|m| returns.get(&m.ticker, day.date).contribution() * m.weight)
                .sum();
            *level *= 1.0 + daily_return;

            Some(IndexPerformanceRecord {
                date: day.date,
                daily_return,
                cumulative_value: *level,
            })
        })
        .collect()
}
