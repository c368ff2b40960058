use ferrocorr_core::{SeriesSummary, Ticker};
use indexmap::IndexMap;

use crate::cli::InputArgs;
use crate::error::CliError;

use super::{decode_warnings, load_input, CommandResult};

pub fn run(args: &InputArgs) -> Result<CommandResult, CliError> {
    let decoded = load_input(args)?;
    let summaries: IndexMap<&Ticker, SeriesSummary> = decoded
        .series
        .iter()
        .map(|(ticker, series)| (ticker, SeriesSummary::from_values(&series.prices())))
        .collect();

    Ok(CommandResult::ok(serde_json::to_value(summaries)?).with_warnings(decode_warnings(&decoded)))
}
