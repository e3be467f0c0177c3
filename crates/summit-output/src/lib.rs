#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/summit-index/summit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod frames;
pub mod summary;

pub use export::{
    CompositionChangeRow, ExportError, ExportFormat, Exporter, Table, export_run, export_table,
};
pub use frames::{changes_frame, composition_frame, market_caps_frame, performance_frame};
pub use summary::IndexSummary;
