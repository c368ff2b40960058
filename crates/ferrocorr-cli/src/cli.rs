//! CLI argument definitions for ferrocorr.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `correlate` | Pearson correlation matrix over common timestamps |
//! | `align` | Align series in union or intersection mode |
//! | `stats` | Per-ticker summary statistics of the raw series |
//!
//! Every command reads a `{ticker: [{timestamp, price}, ...]}` JSON document
//! from a file, or from stdin when the path is `-` or omitted.
//!
//! # Examples
//!
//! ```bash
//! ferrocorr correlate prices.json --lookback 3m --pretty
//! cat prices.json | ferrocorr align --mode union
//! ferrocorr stats prices.json --format table
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ferrocorr_core::{Lookback, Parallelism};

/// Correlation analytics for multi-instrument price series.
#[derive(Debug, Parser)]
#[command(
    name = "ferrocorr",
    author,
    version,
    about = "Correlation analytics for multi-instrument price series"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// Single JSON object.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the correlation matrix and per-ticker standard deviations.
    ///
    /// Tickers without enough overlapping timestamps are left out of the
    /// matrix; read the `tickers` field to label rows and columns.
    Correlate(CorrelateArgs),

    /// Align series onto a shared timestamp grid.
    Align(AlignArgs),

    /// Summarize each raw series (count, mean, standard deviation, range).
    Stats(InputArgs),
}

/// Input source shared by all commands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Path to the JSON price document; `-` or omitted reads stdin.
    pub input: Option<PathBuf>,
}

/// Arguments for the `correlate` command.
#[derive(Debug, Args)]
pub struct CorrelateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Trailing window applied before alignment (1w, 1m, 3m, 6m, 1y, 5y, max).
    #[arg(long, default_value = "max")]
    pub lookback: Lookback,

    /// Scheduling of the pairwise loop (auto, sequential, parallel).
    #[arg(long, default_value = "auto")]
    pub parallelism: Parallelism,

    /// Ticker count from which `auto` runs the pairwise loop in parallel.
    #[arg(long, default_value_t = 32)]
    pub parallel_threshold: usize,
}

/// Arguments for the `align` command.
#[derive(Debug, Args)]
pub struct AlignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Keep every timestamp (union) or only the shared ones (intersection).
    #[arg(long, value_enum, default_value_t = AlignMode::Intersection)]
    pub mode: AlignMode,
}

/// Alignment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlignMode {
    Union,
    Intersection,
}
