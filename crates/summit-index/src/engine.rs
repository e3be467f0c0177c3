//! End-to-end index construction.

use crate::changes::{CompositionChange, track_changes};
use crate::composition::Composition;
use crate::config::IndexConfig;
use crate::error::Result;
use crate::market_cap::{MarketCapRecord, MarketCapSeries, build_instrument_series};
use crate::performance::{IndexPerformanceRecord, ReturnTable, compute_performance};
use crate::selection::select_top_n;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::HashMap;
use summit_data::{DataError, InstrumentData};
use tracing::{info, warn};

/// An instrument excluded from a run because its data failed validation.
#[derive(Debug)]
pub struct RejectedInstrument {
    /// Ticker of the instrument.
    pub ticker: String,
    /// Why it was rejected.
    pub error: DataError,
}

/// Everything produced by one index run.
#[derive(Debug, Clone)]
pub struct IndexRun {
    /// Configuration the run used.
    pub config: IndexConfig,
    /// Market caps of every accepted instrument.
    pub market_caps: MarketCapSeries,
    /// Weighted constituents per date.
    pub composition: Composition,
    /// Dates on which the constituent set changed.
    pub changes: Vec<CompositionChange>,
    /// Daily and cumulative index performance.
    pub performance: Vec<IndexPerformanceRecord>,
}

impl IndexRun {
    /// Performance record of a date, if the index existed then.
    pub fn performance_on(&self, date: NaiveDate) -> Option<&IndexPerformanceRecord> {
        self.performance
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| &self.performance[i])
    }

    /// Last date with index data.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.performance.last().map(|p| p.date)
    }
}

/// Builds an equal-weight top-N index from instrument data.
#[derive(Debug, Clone)]
pub struct IndexEngine {
    config: IndexConfig,
}

impl IndexEngine {
    /// Create an engine for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Build the market-cap series of every instrument inside the window.
    ///
    /// Instruments are processed in parallel. `on_instrument` is called
    /// once per instrument as it completes. Invalid instruments are
    /// returned separately and do not affect the others. Every copy of a
    /// ticker supplied more than once is rejected.
    pub fn build_market_caps<F>(
        &self,
        instruments: &[InstrumentData],
        on_instrument: F,
    ) -> (MarketCapSeries, Vec<RejectedInstrument>)
    where
        F: Fn(&str) + Sync,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for instrument in instruments {
            *counts.entry(instrument.ticker.as_str()).or_default() += 1;
        }
        let (unique, repeated): (Vec<&InstrumentData>, Vec<&InstrumentData>) = instruments
            .iter()
            .partition(|i| counts[i.ticker.as_str()] == 1);

        let mut rejected: Vec<RejectedInstrument> = repeated
            .into_iter()
            .map(|instrument| {
                warn!(
                    ticker = %instrument.ticker,
                    "ticker supplied more than once, rejecting every copy"
                );
                on_instrument(&instrument.ticker);
                RejectedInstrument {
                    ticker: instrument.ticker.clone(),
                    error: DataError::DuplicateTicker {
                        ticker: instrument.ticker.clone(),
                    },
                }
            })
            .collect();

        let outcomes: Vec<(String, summit_data::Result<Vec<MarketCapRecord>>)> = unique
            .par_iter()
            .map(|instrument| {
                let window = instrument.prices.within(self.config.start, self.config.end);
                let outcome = build_instrument_series(instrument, &window);
                on_instrument(&instrument.ticker);
                (instrument.ticker.clone(), outcome)
            })
            .collect();

        let mut records = Vec::new();
        for (ticker, outcome) in outcomes {
            match outcome {
                Ok(mut series) => records.append(&mut series),
                Err(error) => {
                    warn!(ticker = %ticker, error = %error, "rejecting instrument");
                    rejected.push(RejectedInstrument { ticker, error });
                }
            }
        }

        (MarketCapSeries::from_records(records), rejected)
    }

    /// Build the index from an already computed market-cap series.
    pub fn build_index(&self, market_caps: MarketCapSeries) -> IndexRun {
        let composition = Composition::assemble(
            select_top_n(&market_caps, self.config.top_n),
            self.config.top_n,
            self.config.weighting,
        );
        let changes = track_changes(composition.ticker_sets());
        let returns = ReturnTable::from_series(&market_caps);
        let performance = compute_performance(&composition, &returns);

        info!(
            dates = composition.len(),
            changes = changes.len(),
            "index constructed"
        );

        IndexRun {
            config: self.config.clone(),
            market_caps,
            composition,
            changes,
            performance,
        }
    }

    /// Run the whole pipeline.
    pub fn run(&self, instruments: &[InstrumentData]) -> (IndexRun, Vec<RejectedInstrument>) {
        self.run_with_progress(instruments, |_| {})
    }

    /// Run the whole pipeline, reporting each processed instrument.
    pub fn run_with_progress<F>(
        &self,
        instruments: &[InstrumentData],
        on_instrument: F,
    ) -> (IndexRun, Vec<RejectedInstrument>)
    where
        F: Fn(&str) + Sync,
    {
        info!(
            instruments = instruments.len(),
            top_n = self.config.top_n,
            start = %self.config.start,
            end = %self.config.end,
            "building index"
        );

        let (market_caps, rejected) = self.build_market_caps(instruments, on_instrument);
        info!(
            records = market_caps.len(),
            tickers = market_caps.tickers().len(),
            rejected = rejected.len(),
            "market caps built"
        );

        (self.build_index(market_caps), rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use summit_data::{PricePoint, PriceHistory};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn instrument(ticker: &str, closes: &[(u32, f64)], shares: Option<f64>) -> InstrumentData {
        let points = closes
            .iter()
            .map(|&(d, c)| PricePoint::new(date(d), c))
            .collect();
        InstrumentData::new(ticker, ticker, PriceHistory::new(ticker, points).unwrap(), shares)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = IndexEngine::new(IndexConfig::new(0, date(2), date(10)));
        assert!(matches!(result, Err(IndexError::InvalidTopN(0))));
    }

    #[test]
    fn test_bad_instrument_isolated() {
        let engine = IndexEngine::new(IndexConfig::new(2, date(1), date(31))).unwrap();
        let instruments = vec![
            instrument("A", &[(2, 10.0), (3, 11.0)], Some(100.0)),
            instrument("B", &[(2, 10.0), (3, 11.0)], Some(-1.0)),
            instrument("C", &[(2, 10.0)], None),
        ];

        let seen = AtomicUsize::new(0);
        let (run, rejected) = engine.run_with_progress(&instruments, |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(seen.load(Ordering::Relaxed), 3);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].ticker, "B");
        assert_eq!(run.market_caps.tickers().into_iter().collect::<Vec<_>>(), vec!["A"]);
        assert!(run.composition.rows().all(|c| c.ticker == "A"));
    }

    #[test]
    fn test_duplicate_tickers_rejected() {
        let engine = IndexEngine::new(IndexConfig::new(2, date(1), date(31))).unwrap();
        let instruments = vec![
            instrument("A", &[(2, 10.0), (3, 11.0)], Some(100.0)),
            instrument("A", &[(2, 20.0), (3, 20.0)], Some(100.0)),
            instrument("B", &[(2, 5.0), (3, 5.0)], Some(100.0)),
        ];

        let seen = AtomicUsize::new(0);
        let (run, rejected) = engine.run_with_progress(&instruments, |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(seen.load(Ordering::Relaxed), 3);
        assert_eq!(rejected.len(), 2);
        assert!(rejected.iter().all(|r| {
            r.ticker == "A" && matches!(r.error, DataError::DuplicateTicker { .. })
        }));

        assert_eq!(run.market_caps.tickers().into_iter().collect::<Vec<_>>(), vec!["B"]);
        assert!(run.composition.rows().all(|c| c.ticker == "B"));
        assert_eq!(run.performance[0].daily_return, 0.0);
        assert_eq!(run.performance[0].cumulative_value, 1.0);
    }

    #[test]
    fn test_window_is_end_exclusive() {
        let engine = IndexEngine::new(IndexConfig::new(1, date(3), date(6))).unwrap();
        let instruments = vec![instrument(
            "A",
            &[(2, 10.0), (3, 11.0), (4, 12.0), (6, 13.0)],
            Some(1.0),
        )];

        let (run, _) = engine.run(&instruments);
        assert_eq!(run.market_caps.dates(), vec![date(3), date(4)]);
        // Day 3 is the first in-window observation.
        assert_eq!(run.performance[0].daily_return, 0.0);
        assert_eq!(run.latest_date(), Some(date(4)));
        assert!(run.performance_on(date(6)).is_none());
    }
}
