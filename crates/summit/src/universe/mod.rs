//! Instrument universe of a run.
//!
//! The universe is whatever the data source supplied. It maps tickers to
//! company names for reporting.

mod listing;

pub use listing::{InstrumentUniverse, Listing};
