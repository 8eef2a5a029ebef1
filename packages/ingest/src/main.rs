#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the payslip harvester.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use payslip_stats_catalog::Catalog;
use payslip_stats_export::{NumberFormat, OutputFormat};
use payslip_stats_ingest::{HarvestOptions, harvest_file, payslip_files};

#[derive(Parser)]
#[command(
    name = "payslip_stats_ingest",
    about = "Collect share-purchase totals from a directory of payslip PDFs"
)]
struct Cli {
    /// Directory containing the payslip PDFs
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Output file; the format's extension is appended when missing
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Output format(s)
    #[arg(short = 'f', long = "output-format", value_enum, value_delimiter = ',')]
    output_format: Vec<FormatArg>,

    /// Only output the share totals, not the per-article rows
    #[arg(short, long)]
    simple: bool,

    /// Log verbosity
    #[arg(short, long, value_enum, default_value = "error")]
    verbose: Verbosity,

    /// Number format used in the CSV summary
    #[arg(short, long, value_enum, default_value = "dk")]
    number_format: NumberFormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    Toml,
    Xml,
    Msgpack,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::Toml => Self::Toml,
            FormatArg::Xml => Self::Xml,
            FormatArg::Msgpack => Self::Msgpack,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Verbosity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Verbosity {
    const fn level(self) -> log::LevelFilter {
        match self {
            Self::Trace => log::LevelFilter::Trace,
            Self::Debug => log::LevelFilter::Debug,
            Self::Info => log::LevelFilter::Info,
            Self::Warn => log::LevelFilter::Warn,
            Self::Error => log::LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NumberFormatArg {
    Dk,
    En,
}

impl From<NumberFormatArg> for NumberFormat {
    fn from(arg: NumberFormatArg) -> Self {
        match arg {
            NumberFormatArg::Dk => Self::Danish,
            NumberFormatArg::En => Self::English,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = init_logger(cli.verbose.level());

    let catalog = Catalog::builtin();
    let files = payslip_files(&cli.input)?;
    log::info!("Found {} payslip file(s) in {}", files.len(), cli.input.display());

    let bar = multi.add(ProgressBar::new(files.len() as u64));
    bar.set_style(
        ProgressStyle::with_template("{msg} {wide_bar:.cyan/dim} {pos}/{len} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    bar.set_message("Parsing payslips");

    let options = HarvestOptions {
        simple: cli.simple,
        prompt_for_month: true,
    };

    let mut statements = BTreeMap::new();
    for path in &files {
        if let Some((month, statement)) = harvest_file(path, catalog, options)? {
            statements.insert(month, statement);
        }
        bar.inc(1);
    }
    bar.finish_with_message(format!("Parsed {} payslip(s)", statements.len()));

    for format in cli.output_format {
        let written = payslip_stats_export::write_statements(
            format.into(),
            &statements,
            &cli.output,
            cli.number_format.into(),
        )?;
        println!("Wrote {}", written.display());
    }

    Ok(())
}

/// Routes log output through the progress bars so they never fight
/// over the terminal.
fn init_logger(level: log::LevelFilter) -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .filter_level(level)
        .build();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();
    log::set_max_level(level);

    multi
}
