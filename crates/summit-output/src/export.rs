//! Export of index run tables.
//!
//! Every table can be written as CSV, compact JSON or pretty-printed JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use summit_index::{CompositionChange, IndexRun};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// The output tables of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// `date, ticker, close_price, market_cap`
    MarketCaps,
    /// `date, ticker, market_cap, weight`
    DailyComposition,
    /// `date, additions, removals, added_tickers, removed_tickers`
    CompositionChanges,
    /// `date, daily_return, cumulative_value`
    IndexPerformance,
}

impl Table {
    /// All tables in write order.
    pub const ALL: [Self; 4] = [
        Self::MarketCaps,
        Self::DailyComposition,
        Self::CompositionChanges,
        Self::IndexPerformance,
    ];

    /// File name without extension.
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::MarketCaps => "market_caps",
            Self::DailyComposition => "daily_composition",
            Self::CompositionChanges => "composition_changes",
            Self::IndexPerformance => "index_performance",
        }
    }
}

/// Flat composition-change row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompositionChangeRow {
    /// Date of the change.
    pub date: NaiveDate,
    /// Number of tickers added.
    pub additions: usize,
    /// Number of tickers removed.
    pub removals: usize,
    /// Added tickers, comma separated.
    pub added_tickers: String,
    /// Removed tickers, comma separated.
    pub removed_tickers: String,
}

impl From<&CompositionChange> for CompositionChangeRow {
    fn from(change: &CompositionChange) -> Self {
        Self {
            date: change.date,
            additions: change.additions(),
            removals: change.removals(),
            added_tickers: change.added_joined(),
            removed_tickers: change.removed_joined(),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl<T: Serialize> Exporter for [T] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                Ok(String::from_utf8(bytes)?)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Serialize one table of a run.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_table(run: &IndexRun, table: Table, format: ExportFormat) -> Result<String, ExportError> {
    match table {
        Table::MarketCaps => run.market_caps.records().export_to_string(format),
        Table::DailyComposition => {
            let rows: Vec<_> = run.composition.rows().collect();
            rows.export_to_string(format)
        }
        Table::CompositionChanges => {
            let rows: Vec<CompositionChangeRow> = run.changes.iter().map(Into::into).collect();
            rows.export_to_string(format)
        }
        Table::IndexPerformance => run.performance.export_to_string(format),
    }
}

/// Write every table of a run into `dir`, creating it if needed.
///
/// Returns the written paths in [`Table::ALL`] order.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a table cannot be
/// serialized or written.
pub fn export_run(run: &IndexRun, dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;

    Table::ALL
        .iter()
        .map(|&table| {
            let path = dir.join(format!("{}.{}", table.file_stem(), format.extension()));
            let content = export_table(run, table, format)?;
            fs::write(&path, content)?;
            info!(path = %path.display(), "wrote table");
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use summit_index::{IndexPerformanceRecord, MarketCapRecord};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn set(tickers: &[&str]) -> BTreeSet<String> {
        tickers.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }

    #[test]
    fn test_change_row_flattening() {
        let change = CompositionChange {
            date: date(3),
            added: set(&["NVDA", "AVGO"]),
            removed: set(&["INTC"]),
        };

        let row = CompositionChangeRow::from(&change);
        assert_eq!(row.additions, 2);
        assert_eq!(row.removals, 1);
        assert_eq!(row.added_tickers, "AVGO, NVDA");
        assert_eq!(row.removed_tickers, "INTC");

        let csv = [row].export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("date,additions,removals,added_tickers,removed_tickers\n"));
        assert!(csv.contains("2025-01-03,2,1,\"AVGO, NVDA\",INTC"));
    }

    #[test]
    fn test_market_cap_csv() {
        let records = vec![MarketCapRecord {
            date: date(2),
            ticker: "AAPL".to_string(),
            close_price: 243.85,
            market_cap: 3_686_000_000_000,
        }];

        let csv = records.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "date,ticker,close_price,market_cap\n2025-01-02,AAPL,243.85,3686000000000\n"
        );
    }

    #[test]
    fn test_performance_json() {
        let records = vec![IndexPerformanceRecord {
            date: date(2),
            daily_return: 0.04,
            cumulative_value: 1.04,
        }];

        let json = records.export_to_string(ExportFormat::Json).unwrap();
        assert_eq!(
            json,
            r#"[{"date":"2025-01-02","daily_return":0.04,"cumulative_value":1.04}]"#
        );

        let pretty = records.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(pretty.contains("  ")); // Indentation indicates pretty format
    }

    #[test]
    fn test_empty_table_csv_is_empty() {
        let rows: Vec<CompositionChangeRow> = Vec::new();
        assert_eq!(rows.export_to_string(ExportFormat::Csv).unwrap(), "");
        assert_eq!(rows.export_to_string(ExportFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn test_table_file_stems() {
        let stems: Vec<_> = Table::ALL.iter().map(Table::file_stem).collect();
        assert_eq!(
            stems,
            vec![
                "market_caps",
                "daily_composition",
                "composition_changes",
                "index_performance"
            ]
        );
    }
}
