//! Daily market-capitalization series.

use crate::shares::{SharesPoint, effective_shares};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use summit_data::{InstrumentData, PriceHistory};
use tracing::{debug, warn};

/// Market capitalization of one instrument on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapRecord {
    /// Trading date.
    pub date: NaiveDate,
    /// Ticker symbol.
    pub ticker: String,
    /// Close price on that date.
    pub close_price: f64,
    /// `floor(close_price * effective_shares)`.
    pub market_cap: i64,
}

/// Market-cap records for all instruments, ordered by `(date, ticker)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCapSeries {
    records: Vec<MarketCapRecord>,
}

impl MarketCapSeries {
    /// Build a series from records in any order.
    pub fn from_records(mut records: Vec<MarketCapRecord>) -> Self {
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.ticker.cmp(&b.ticker)));
        Self { records }
    }

    /// All records ordered by `(date, ticker)`.
    pub fn records(&self) -> &[MarketCapRecord] {
        &self.records
    }

    /// Number of records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series has no records.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<_> = self.records.iter().map(|r| r.date).collect();
        dates.dedup();
        dates
    }

    /// Distinct tickers in lexical order.
    pub fn tickers(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.ticker.as_str()).collect()
    }

    /// Records of a single ticker in ascending date order.
    pub fn for_ticker<'a>(&'a self, ticker: &'a str) -> impl Iterator<Item = &'a MarketCapRecord> {
        self.records.iter().filter(move |r| r.ticker == ticker)
    }
}

/// Combine prices with effective shares aligned to the same dates.
///
/// Price dates without a shares value are dropped with a warning.
pub fn combine(prices: &PriceHistory, shares: &[SharesPoint]) -> Vec<MarketCapRecord> {
    let by_date: HashMap<NaiveDate, f64> = shares.iter().map(|p| (p.date, p.shares)).collect();

    prices
        .points()
        .iter()
        .filter_map(|point| {
            let Some(&shares) = by_date.get(&point.date) else {
                warn!(
                    ticker = prices.ticker(),
                    date = %point.date,
                    "no effective shares for price date, dropping"
                );
                return None;
            };

            Some(MarketCapRecord {
                date: point.date,
                ticker: prices.ticker().to_string(),
                close_price: point.close,
                market_cap: (point.close * shares).floor() as i64,
            })
        })
        .collect()
}

/// Build the market-cap records of one instrument over `prices`.
///
/// `prices` is normally the instrument's own history restricted to the run
/// window. An instrument without a shares figure yields no records.
///
/// # Errors
///
/// Returns an error if the shares figure or the split history is invalid.
pub fn build_instrument_series(
    instrument: &InstrumentData,
    prices: &PriceHistory,
) -> summit_data::Result<Vec<MarketCapRecord>> {
    let Some(shares) = instrument.validated_shares()? else {
        warn!(ticker = %instrument.ticker, "no shares outstanding, excluding instrument");
        return Ok(Vec::new());
    };
    let splits = instrument.split_history()?;

    if prices.is_empty() {
        debug!(ticker = %instrument.ticker, "no prices in window");
        return Ok(Vec::new());
    }

    let adjusted = effective_shares(shares, &splits, &prices.dates());
    Ok(combine(prices, &adjusted))
}
