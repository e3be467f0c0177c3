//! Delimited-file instrument source.
//!
//! Three files make up a data set:
//! - prices: `date,ticker,close_price`
//! - instruments: `ticker,company_name,shares_outstanding`
//! - splits (optional): `ticker,effective_date,ratio`

use super::InstrumentSource;
use crate::error::{DataError, Result};
use crate::instrument::InstrumentData;
use crate::prices::{PricePoint, PriceHistory};
use crate::splits::SplitEvent;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct PriceRow {
    date: String,
    ticker: String,
    close_price: f64,
}

#[derive(Debug, Deserialize)]
struct InstrumentRow {
    ticker: String,
    company_name: Option<String>,
    shares_outstanding: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SplitRow {
    ticker: String,
    effective_date: String,
    ratio: f64,
}

#[derive(Debug, Default)]
struct Pending {
    company_name: Option<String>,
    shares_outstanding: Option<f64>,
    points: Vec<PricePoint>,
    splits: Vec<SplitEvent>,
}

/// Parse a date in `YYYY-MM-DD` or `YYYYMMDD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|e| DataError::Parse(format!("Invalid date '{}': {}", s, e)))
}

/// Build instruments from price, instrument and split readers.
///
/// Tickers that appear only in the instruments file get an empty price
/// history. Tickers that appear only in the prices file get no shares
/// figure. A ticker whose prices cannot form a valid history is logged and
/// returned with an empty history.
///
/// # Errors
///
/// Returns an error on I/O failure, malformed CSV, or an unparseable date.
pub fn load_instruments<P: Read, I: Read, S: Read>(
    prices: P,
    instruments: I,
    splits: Option<S>,
) -> Result<Vec<InstrumentData>> {
    let mut pending: BTreeMap<String, Pending> = BTreeMap::new();

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(instruments);
    for row in rdr.deserialize() {
        let row: InstrumentRow = row?;
        let entry = pending.entry(row.ticker).or_default();
        entry.company_name = row.company_name.filter(|n| !n.is_empty());
        entry.shares_outstanding = row.shares_outstanding;
    }

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(prices);
    for row in rdr.deserialize() {
        let row: PriceRow = row?;
        let date = parse_date(&row.date)?;
        pending
            .entry(row.ticker)
            .or_default()
            .points
            .push(PricePoint::new(date, row.close_price));
    }

    if let Some(splits) = splits {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(splits);
        for row in rdr.deserialize() {
            let row: SplitRow = row?;
            let date = parse_date(&row.effective_date)?;
            pending
                .entry(row.ticker)
                .or_default()
                .splits
                .push(SplitEvent::new(date, row.ratio));
        }
    }

    let instruments = pending
        .into_iter()
        .map(|(ticker, p)| {
            let prices = PriceHistory::from_unsorted(ticker.as_str(), p.points).unwrap_or_else(|e| {
                warn!(ticker = %ticker, error = %e, "discarding invalid price history");
                PriceHistory::empty(ticker.as_str())
            });
            debug!(ticker = %ticker, observations = prices.len(), "loaded instrument");

            let company_name = p.company_name.unwrap_or_else(|| ticker.clone());
            InstrumentData::new(ticker, company_name, prices, p.shares_outstanding)
                .with_splits(p.splits)
        })
        .collect();

    Ok(instruments)
}

/// Instrument source backed by delimited files on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    prices_path: PathBuf,
    instruments_path: PathBuf,
    splits_path: Option<PathBuf>,
}

impl CsvSource {
    /// Create a source from a prices file and an instruments file.
    pub fn new(prices_path: impl Into<PathBuf>, instruments_path: impl Into<PathBuf>) -> Self {
        Self {
            prices_path: prices_path.into(),
            instruments_path: instruments_path.into(),
            splits_path: None,
        }
    }

    /// Add a splits file.
    pub fn with_splits(mut self, splits_path: impl Into<PathBuf>) -> Self {
        self.splits_path = Some(splits_path.into());
        self
    }
}

impl InstrumentSource for CsvSource {
    fn load(&self) -> Result<Vec<InstrumentData>> {
        let prices = File::open(&self.prices_path)?;
        let instruments = File::open(&self.instruments_path)?;
        let splits = self.splits_path.as_ref().map(File::open).transpose()?;

        load_instruments(prices, instruments, splits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICES: &str = "date,ticker,close_price
2024-05-01,AAPL,100.0
2024-06-02,AAPL,50.0
20240501,MSFT,400.0
";

    const INSTRUMENTS: &str = "ticker,company_name,shares_outstanding
AAPL,Apple Inc.,1000000
MSFT,Microsoft Corporation,
GOOG,,5000
";

    const SPLITS: &str = "ticker,effective_date,ratio
AAPL,2024-06-01,2.0
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-05-01").unwrap(), date(2024, 5, 1));
        assert_eq!(parse_date("20240501").unwrap(), date(2024, 5, 1));
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn test_load_instruments() {
        let instruments =
            load_instruments(PRICES.as_bytes(), INSTRUMENTS.as_bytes(), Some(SPLITS.as_bytes()))
                .unwrap();

        let tickers: Vec<_> = instruments.iter().map(|i| i.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "GOOG", "MSFT"]);

        let aapl = &instruments[0];
        assert_eq!(aapl.company_name, "Apple Inc.");
        assert_eq!(aapl.shares_outstanding, Some(1_000_000.0));
        assert_eq!(aapl.prices.len(), 2);
        assert_eq!(aapl.splits, vec![SplitEvent::new(date(2024, 6, 1), 2.0)]);

        let goog = &instruments[1];
        assert_eq!(goog.company_name, "GOOG");
        assert!(goog.prices.is_empty());

        let msft = &instruments[2];
        assert_eq!(msft.shares_outstanding, None);
        assert_eq!(msft.prices.close_on(date(2024, 5, 1)), Some(400.0));
    }

    #[test]
    fn test_invalid_history_becomes_empty() {
        let prices = "date,ticker,close_price
2024-05-01,AAPL,100.0
2024-05-01,AAPL,101.0
";
        let instruments = load_instruments(
            prices.as_bytes(),
            "ticker,company_name,shares_outstanding\n".as_bytes(),
            None::<&[u8]>,
        )
        .unwrap();

        assert_eq!(instruments.len(), 1);
        assert!(instruments[0].prices.is_empty());
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let prices = "date,ticker,close_price
yesterday,AAPL,100.0
";
        let result = load_instruments(
            prices.as_bytes(),
            "ticker,company_name,shares_outstanding\n".as_bytes(),
            None::<&[u8]>,
        );
        assert!(matches!(result, Err(DataError::Parse(_))));
    }
}
