//! Load instruments, build the index and report progress.

use super::settings::RunSettings;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use summit::InstrumentUniverse;
use summit_data::{DataError, InstrumentSource};
use summit_index::{IndexEngine, IndexError, IndexRun, RejectedInstrument};
use tracing::info;

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    /// Input files could not be loaded.
    #[error("Data load error: {0}")]
    Data(#[from] DataError),
    /// The index configuration was rejected.
    #[error("Invalid index configuration: {0}")]
    Config(#[from] IndexError),
    /// The progress bar template is malformed.
    #[error("Progress display error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

/// Result of one pipeline run.
#[derive(Debug)]
pub(crate) struct PipelineOutput {
    pub(crate) run: IndexRun,
    pub(crate) rejected: Vec<RejectedInstrument>,
    pub(crate) universe: InstrumentUniverse,
}

fn progress_bar(len: usize, visible: bool) -> Result<ProgressBar, PipelineError> {
    let pb = if visible {
        ProgressBar::new(len as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    Ok(pb)
}

/// Load the configured files and build the index.
///
/// The configuration is validated before any file is read.
pub(crate) fn run_pipeline(
    settings: &RunSettings,
    show_progress: bool,
) -> Result<PipelineOutput, PipelineError> {
    let engine = IndexEngine::new(settings.config.clone())?;

    let instruments = settings.source().load()?;
    info!(
        instruments = instruments.len(),
        prices = %settings.prices.display(),
        "loaded instruments"
    );
    let universe = InstrumentUniverse::from_instruments(&instruments);

    let pb = progress_bar(instruments.len(), show_progress)?;
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Building market caps...");

    let (run, rejected) = engine.run_with_progress(&instruments, |_| pb.inc(1));

    pb.finish_with_message(format!(
        "Built index over {} dates ({} rejected)",
        run.composition.len(),
        rejected.len()
    ));

    Ok(PipelineOutput {
        run,
        rejected,
        universe,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::settings::SettingsLayer;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("summit-bin-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn settings(dir: &std::path::Path, top_n: usize) -> RunSettings {
        SettingsLayer {
            prices: Some(dir.join("prices.csv")),
            instruments: Some(dir.join("instruments.csv")),
            top_n: Some(top_n),
            start: Some("2025-01-01".to_string()),
            end: Some("2025-02-01".to_string()),
            ..Default::default()
        }
        .resolve()
        .unwrap()
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = scratch_dir("pipeline");
        fs::write(
            dir.join("prices.csv"),
            "date,ticker,close_price\n\
             2025-01-02,AAA,10.0\n2025-01-03,AAA,11.0\n\
             2025-01-02,BBB,20.0\n2025-01-03,BBB,20.0\n\
             2025-01-02,CCC,5.0\n2025-01-03,CCC,5.0\n",
        )
        .unwrap();
        fs::write(
            dir.join("instruments.csv"),
            "ticker,company_name,shares_outstanding\n\
             AAA,Alpha,1000\nBBB,Beta,1000\nCCC,Gamma,0\n",
        )
        .unwrap();

        let output = run_pipeline(&settings(&dir, 2), false).unwrap();

        assert_eq!(output.rejected.len(), 1);
        assert_eq!(output.rejected[0].ticker, "CCC");
        assert_eq!(output.universe.company_name("BBB"), Some("Beta"));
        assert_eq!(output.run.composition.len(), 2);
        assert!((output.run.performance[1].daily_return - 0.05).abs() < 1e-12);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_config_fails_before_loading() {
        let dir = scratch_dir("invalid");
        let result = run_pipeline(&settings(&dir, 0), false);
        assert!(matches!(result, Err(PipelineError::Config(_))));
        fs::remove_dir_all(&dir).ok();
    }
}
