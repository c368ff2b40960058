mod align;
mod correlate;
mod stats;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::time::Instant;

use ferrocorr_core::{read_price_map, DecodedInput, Envelope, EnvelopeMeta};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::cli::{Cli, Command, InputArgs};
use crate::error::CliError;

const SCHEMA_VERSION: &str = "v1.0.0";

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Correlate(args) => correlate::run(args)?,
        Command::Align(args) => align::run(args)?,
        Command::Stats(args) => stats::run(args)?,
    };

    let CommandResult { data, warnings } = command_result;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), SCHEMA_VERSION, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    info!(request_id = %meta.request_id, latency_ms, "command complete");
    Envelope::new(meta, data).map_err(CliError::from)
}

/// Reads and decodes the price document named by `args`.
pub fn load_input(args: &InputArgs) -> Result<DecodedInput, CliError> {
    let decoded = match args.input.as_deref() {
        None => read_price_map(io::stdin().lock())?,
        Some(path) if path == Path::new("-") => read_price_map(io::stdin().lock())?,
        Some(path) => read_price_map(BufReader::new(File::open(path)?))?,
    };

    info!(
        tickers = decoded.report.tickers,
        points = decoded.report.points,
        skipped = decoded.report.skipped(),
        "loaded price document"
    );
    Ok(decoded)
}

/// Warnings describing entries the decoder skipped.
pub fn decode_warnings(decoded: &DecodedInput) -> Vec<String> {
    let report = decoded.report;
    let mut warnings = Vec::new();
    if report.invalid_tickers > 0 {
        warnings.push(format!("skipped {} invalid ticker key(s)", report.invalid_tickers));
    }
    if report.non_array_series > 0 {
        warnings.push(format!(
            "skipped {} series that were not arrays",
            report.non_array_series
        ));
    }
    if report.malformed_points > 0 {
        warnings.push(format!(
            "skipped {} malformed price point(s)",
            report.malformed_points
        ));
    }
    warnings
}
