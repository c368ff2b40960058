use std::fmt::Write as _;

use ferrocorr_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(envelope)?,
        OutputFormat::Json => serde_json::to_string(envelope)?,
        OutputFormat::Table => render_table(envelope)?,
    };
    println!("{payload}");
    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut out = String::new();
    let _ = writeln!(out, "request_id  : {}", envelope.meta.request_id);
    let _ = writeln!(out, "schema      : {}", envelope.meta.schema_version);
    let _ = writeln!(out, "generated_at: {}", envelope.meta.generated_at);
    let _ = writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms);

    if !envelope.meta.warnings.is_empty() {
        let _ = writeln!(out, "warnings:");
        for warning in &envelope.meta.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    let _ = writeln!(out, "data:");
    match matrix_table(&envelope.data) {
        Some(table) => out.push_str(&table),
        None => {
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
    }

    Ok(out.trim_end().to_owned())
}

/// Grid rendering of a correlation result; `None` when `data` is not one.
fn matrix_table(data: &Value) -> Option<String> {
    let tickers: Vec<&str> = data
        .get("tickers")?
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect::<Option<_>>()?;
    let matrix = data.get("matrix")?.as_array()?;
    let data_points = data.get("dataPoints")?.as_u64()?;

    let width = tickers.iter().map(|t| t.len()).max().unwrap_or(0).max(7);
    let mut out = String::new();
    let _ = writeln!(out, "  data_points: {data_points}");

    let _ = write!(out, "  {:width$}", "");
    for ticker in &tickers {
        let _ = write!(out, " {ticker:>width$}");
    }
    let _ = writeln!(out, " {:>width$}", "std_dev");

    let std_devs = data.get("standardDeviations");
    for (ticker, row) in tickers.iter().zip(matrix) {
        let _ = write!(out, "  {ticker:<width$}");
        for value in row.as_array()? {
            let _ = write!(out, " {:>width$.4}", value.as_f64()?);
        }
        let std_dev = std_devs
            .and_then(|map| map.get(*ticker))
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let _ = writeln!(out, " {std_dev:>width$.4}");
    }

    Some(out)
}
