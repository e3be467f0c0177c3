#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/summit-index/summit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod changes;
pub mod composition;
pub mod config;
pub mod engine;
pub mod error;
pub mod market_cap;
pub mod performance;
pub mod selection;
pub mod shares;
pub mod weights;

pub use changes::{CompositionChange, track_changes};
pub use composition::{Composition, DailyConstituents};
pub use config::{DEFAULT_TOP_N, IndexConfig};
pub use engine::{IndexEngine, IndexRun, RejectedInstrument};
pub use error::{IndexError, Result};
pub use market_cap::{MarketCapRecord, MarketCapSeries, build_instrument_series};
pub use performance::{IndexPerformanceRecord, PeriodReturn, ReturnTable, compute_performance};
pub use selection::select_top_n;
pub use shares::{SharesPoint, SplitAdjuster, effective_shares};
pub use weights::{ConstituentSnapshot, WeightPolicy, assign_weights};
