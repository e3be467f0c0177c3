//! Equal-weight assignment.

use crate::market_cap::MarketCapRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How constituents on a date are weighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// `1 / top_n` per constituent. Weights sum below 1.0 on dates with
    /// fewer than `top_n` constituents.
    #[default]
    EqualBySlot,
    /// `1 / selected` per constituent, always summing to 1.0.
    EqualByCount,
}

impl WeightPolicy {
    /// Weight of each constituent given the configured size and the number
    /// actually selected.
    pub fn weight(self, top_n: usize, selected: usize) -> f64 {
        let denominator = match self {
            Self::EqualBySlot => top_n,
            Self::EqualByCount => selected,
        };
        if denominator == 0 {
            0.0
        } else {
            1.0 / denominator as f64
        }
    }
}

/// One selected constituent on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituentSnapshot {
    /// Trading date.
    pub date: NaiveDate,
    /// Ticker symbol.
    pub ticker: String,
    /// Market cap on that date.
    pub market_cap: i64,
    /// Index weight.
    pub weight: f64,
}

/// Weight the constituents selected for a single date.
pub fn assign_weights(
    selected: &[&MarketCapRecord],
    top_n: usize,
    policy: WeightPolicy,
) -> Vec<ConstituentSnapshot> {
    let weight = policy.weight(top_n, selected.len());
    selected
        .iter()
        .map(|r| ConstituentSnapshot {
            date: r.date,
            ticker: r.ticker.clone(),
            market_cap: r.market_cap,
            weight,
        })
        .collect()
}
