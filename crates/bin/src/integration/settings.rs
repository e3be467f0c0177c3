//! Run settings from a JSON config file and command-line overrides.
//!
//! Both layers share one shape. Flags given on the command line replace the
//! matching config file values.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use summit_data::{CsvSource, DataError, parse_date};
use summit_index::{DEFAULT_TOP_N, IndexConfig, WeightPolicy};

/// Error type for settings resolution.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SettingsError {
    /// A required value was given neither as a flag nor in the config file.
    #[error("Missing required setting '{0}' (pass --{0} or set it in the config file)")]
    Missing(&'static str),
    /// A start or end date could not be parsed.
    #[error("{0}")]
    Date(#[from] DataError),
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid JSON for this shape.
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// One layer of run settings, every value optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsLayer {
    pub(crate) prices: Option<PathBuf>,
    pub(crate) instruments: Option<PathBuf>,
    pub(crate) splits: Option<PathBuf>,
    pub(crate) top_n: Option<usize>,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) weighting: Option<WeightPolicy>,
}

impl SettingsLayer {
    /// Read a layer from a JSON file.
    pub(crate) fn read(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Values from `other` where present, falling back to `self`.
    pub(crate) fn overridden_by(self, other: Self) -> Self {
        Self {
            prices: other.prices.or(self.prices),
            instruments: other.instruments.or(self.instruments),
            splits: other.splits.or(self.splits),
            top_n: other.top_n.or(self.top_n),
            start: other.start.or(self.start),
            end: other.end.or(self.end),
            weighting: other.weighting.or(self.weighting),
        }
    }

    /// Fill defaults and parse dates.
    pub(crate) fn resolve(self) -> Result<RunSettings, SettingsError> {
        let prices = self.prices.ok_or(SettingsError::Missing("prices"))?;
        let instruments = self.instruments.ok_or(SettingsError::Missing("instruments"))?;
        let start = parse_date(&self.start.ok_or(SettingsError::Missing("start"))?)?;
        let end = parse_date(&self.end.ok_or(SettingsError::Missing("end"))?)?;

        let config = IndexConfig::new(self.top_n.unwrap_or(DEFAULT_TOP_N), start, end)
            .with_weighting(self.weighting.unwrap_or_default());

        Ok(RunSettings {
            prices,
            instruments,
            splits: self.splits,
            config,
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub(crate) prices: PathBuf,
    pub(crate) instruments: PathBuf,
    pub(crate) splits: Option<PathBuf>,
    pub(crate) config: IndexConfig,
}

impl RunSettings {
    /// The CSV source these settings describe.
    pub(crate) fn source(&self) -> CsvSource {
        let source = CsvSource::new(&self.prices, &self.instruments);
        match &self.splits {
            Some(splits) => source.with_splits(splits),
            None => source,
        }
    }
}
