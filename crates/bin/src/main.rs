//! Summit CLI binary.
//!
//! Builds an equal-weight top-N market-cap index from delimited files.

mod integration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use integration::pipeline::{PipelineOutput, run_pipeline};
use integration::settings::{RunSettings, SettingsError, SettingsLayer};
use std::path::{Path, PathBuf};
use std::process;
use summit_data::parse_date;
use summit_index::WeightPolicy;
use summit_output::{ExportFormat, IndexSummary, export_run, performance_frame};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "summit")]
#[command(about = "Summit: equal-weight top-N market-cap index builder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and write its tables
    Build {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory
        #[arg(long, default_value = "output")]
        out: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Print the last index levels after writing
        #[arg(long)]
        preview: bool,
    },

    /// Build the index and print its state on one date
    Summary {
        #[command(flatten)]
        inputs: InputArgs,

        /// Date to summarize (YYYY-MM-DD or YYYYMMDD), defaults to the latest
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Daily closes file (date,ticker,close_price)
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Instruments file (ticker,company_name,shares_outstanding)
    #[arg(long)]
    instruments: Option<PathBuf>,

    /// Split events file (ticker,effective_date,ratio)
    #[arg(long)]
    splits: Option<PathBuf>,

    /// Number of constituents per date [default: 100]
    #[arg(long)]
    top_n: Option<usize>,

    /// First date, inclusive (YYYY-MM-DD or YYYYMMDD)
    #[arg(long)]
    start: Option<String>,

    /// Last date, exclusive (YYYY-MM-DD or YYYYMMDD)
    #[arg(long)]
    end: Option<String>,

    /// Weighting scheme [default: slot]
    #[arg(long, value_enum)]
    weighting: Option<WeightingArg>,

    /// JSON config file, overridden by any flag given
    #[arg(long)]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn resolve(self) -> Result<RunSettings, SettingsError> {
        let file = match &self.config {
            Some(path) => SettingsLayer::read(path)?,
            None => SettingsLayer::default(),
        };
        let flags = SettingsLayer {
            prices: self.prices,
            instruments: self.instruments,
            splits: self.splits,
            top_n: self.top_n,
            start: self.start,
            end: self.end,
            weighting: self.weighting.map(Into::into),
        };
        file.overridden_by(flags).resolve()
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WeightingArg {
    /// 1/N per slot
    Slot,
    /// 1/selected per constituent
    Count,
}

impl From<WeightingArg> for WeightPolicy {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::Slot => Self::EqualBySlot,
            WeightingArg::Count => Self::EqualByCount,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    PrettyJson,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::PrettyJson => Self::PrettyJson,
        }
    }
}

fn init_tracing() {
    let log_format = std::env::var("SUMMIT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            inputs,
            out,
            format,
            preview,
        } => {
            build_index(inputs.resolve()?, &out, format.into(), preview)?;
        }
        Commands::Summary { inputs, date } => {
            show_summary(inputs.resolve()?, date.as_deref())?;
        }
    }

    Ok(())
}

fn print_header(title: &str, settings: &RunSettings) {
    let config = &settings.config;
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Window:     {} to {} (exclusive)", config.start, config.end);
    println!("Top N:      {}", config.top_n);
    println!("Weighting:  {:?}", config.weighting);
    println!();
}

fn report_rejected(output: &PipelineOutput) {
    if output.rejected.is_empty() {
        return;
    }
    println!("\nRejected instruments ({}):", output.rejected.len());
    for rejected in &output.rejected {
        println!("  {:<8} {}", rejected.ticker, rejected.error);
    }
}

fn build_index(
    settings: RunSettings,
    out: &Path,
    format: ExportFormat,
    preview: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    print_header("EQUAL-WEIGHT INDEX BUILD", &settings);

    let output = run_pipeline(&settings, true)?;
    report_rejected(&output);

    println!("\nWriting tables to {}", out.display());
    for path in export_run(&output.run, out, format)? {
        println!("  ✓ {}", path.display());
    }

    if preview {
        let frame = performance_frame(&output.run.performance)?;
        println!("\n{}", frame.tail(Some(10)));
    }

    if let Some(summary) = IndexSummary::as_of(&output.run, None) {
        println!("\n{}", summary);
    } else {
        println!("\nNo trading dates fell inside the window.");
    }

    Ok(())
}

fn show_summary(
    settings: RunSettings,
    date: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = date.map(parse_date).transpose()?;
    print_header("INDEX SUMMARY", &settings);

    let output = run_pipeline(&settings, true)?;
    report_rejected(&output);

    let Some(summary) = IndexSummary::as_of(&output.run, date) else {
        println!("\nNo trading dates fell inside the window.");
        return Ok(());
    };
    println!("\n{}", summary);

    let Some(day) = output.run.composition.on(summary.as_of) else {
        println!("\nNo constituents on {}.", summary.as_of);
        return Ok(());
    };

    println!("\nConstituents on {}:", day.date);
    println!(
        "{:>4}  {:<8} {:<36} {:>20} {:>8}",
        "#", "Ticker", "Company", "Market Cap", "Weight"
    );
    println!("{}", "─".repeat(80));
    let names = output.universe.name_constituents(day);
    for (rank, (member, (_, company))) in day.members.iter().zip(names).enumerate() {
        println!(
            "{:>4}  {:<8} {:<36} {:>20} {:>7.2}%",
            rank + 1,
            member.ticker,
            company,
            member.market_cap,
            member.weight * 100.0
        );
    }

    Ok(())
}
