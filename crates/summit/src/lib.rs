#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/summit-index/summit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod universe;

// Re-export main types from sub-crates
pub use summit_data as data;
pub use summit_index as index;
pub use summit_output as output;

pub use universe::{InstrumentUniverse, Listing};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
