//! Instrument data sources.
//!
//! The index engine never fetches data itself. A source hands it fully
//! materialized [`InstrumentData`] for every ticker in the universe.

pub mod csv_files;

pub use csv_files::{CsvSource, load_instruments, parse_date};

use crate::error::Result;
use crate::instrument::InstrumentData;

/// A provider of per-instrument input data.
pub trait InstrumentSource {
    /// Load every instrument this source knows about.
    ///
    /// Per-instrument failures should surface as an instrument with an empty
    /// price history, not as an error.
    fn load(&self) -> Result<Vec<InstrumentData>>;
}
