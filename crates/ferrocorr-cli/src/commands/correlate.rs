use ferrocorr_core::{CorrelationEngine, EngineConfig};

use crate::cli::CorrelateArgs;
use crate::error::CliError;

use super::{decode_warnings, load_input, CommandResult};

pub fn run(args: &CorrelateArgs) -> Result<CommandResult, CliError> {
    let config = EngineConfig::default()
        .with_parallelism(args.parallelism)
        .with_parallel_threshold(args.parallel_threshold)?;

    let decoded = load_input(&args.input)?;
    let engine = CorrelationEngine::new(config);
    let result = engine.compute_with_lookback(&decoded.series, args.lookback);

    let mut command_result =
        CommandResult::ok(serde_json::to_value(&result)?).with_warnings(decode_warnings(&decoded));

    if result.is_empty() {
        command_result = command_result.with_warning(format!(
            "not enough overlapping data to correlate (lookback {})",
            args.lookback
        ));
    } else {
        let excluded: Vec<&str> = decoded
            .series
            .keys()
            .filter(|ticker| !result.standard_deviations.contains_key(*ticker))
            .map(|ticker| ticker.as_str())
            .collect();
        if !excluded.is_empty() {
            command_result = command_result.with_warning(format!(
                "excluded tickers without enough overlap: {}",
                excluded.join(",")
            ));
        }
    }

    Ok(command_result)
}
