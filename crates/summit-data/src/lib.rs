#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/summit-index/summit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod instrument;
pub mod prices;
pub mod source;
pub mod splits;

pub use error::{DataError, Result};
pub use instrument::{InstrumentData, SharesOutstanding};
pub use prices::{PricePoint, PriceHistory};
pub use source::{CsvSource, InstrumentSource, parse_date};
pub use splits::{SplitEvent, SplitHistory};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
