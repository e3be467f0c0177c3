//! Ticker to company-name listings.

use std::collections::HashMap;
use summit_data::InstrumentData;
use summit_index::DailyConstituents;

/// A listed instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Ticker symbol.
    pub ticker: String,
    /// Company name.
    pub company_name: String,
}

impl Listing {
    /// Create a new listing.
    pub fn new(ticker: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
        }
    }
}

/// Universe of instruments loaded for a run.
#[derive(Debug, Clone, Default)]
pub struct InstrumentUniverse {
    listings: Vec<Listing>,
    by_ticker: HashMap<String, usize>,
}

impl InstrumentUniverse {
    /// Build a universe from listings. Later duplicates of a ticker are ignored.
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        let mut listings: Vec<Listing> = listings.into_iter().collect();
        listings.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        listings.dedup_by(|a, b| a.ticker == b.ticker);

        let by_ticker = listings
            .iter()
            .enumerate()
            .map(|(i, l)| (l.ticker.clone(), i))
            .collect();

        Self {
            listings,
            by_ticker,
        }
    }

    /// Build a universe from loaded instrument data.
    pub fn from_instruments(instruments: &[InstrumentData]) -> Self {
        Self::new(
            instruments
                .iter()
                .map(|i| Listing::new(&i.ticker, &i.company_name)),
        )
    }

    /// All listings sorted by ticker.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Listing of a ticker.
    pub fn listing(&self, ticker: &str) -> Option<&Listing> {
        self.by_ticker.get(ticker).map(|&i| &self.listings[i])
    }

    /// Company name of a ticker.
    pub fn company_name(&self, ticker: &str) -> Option<&str> {
        self.listing(ticker).map(|l| l.company_name.as_str())
    }

    /// Constituents of a day paired with their company names, in rank order.
    ///
    /// Tickers missing from the universe are named after themselves.
    pub fn name_constituents<'a>(&'a self, day: &'a DailyConstituents) -> Vec<(&'a str, &'a str)> {
        day.members
            .iter()
            .map(|m| {
                let ticker = m.ticker.as_str();
                (ticker, self.company_name(ticker).unwrap_or(ticker))
            })
            .collect()
    }
}
