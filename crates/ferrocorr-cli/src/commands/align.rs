use ferrocorr_core::{align_common, align_union};

use crate::cli::{AlignArgs, AlignMode};
use crate::error::CliError;

use super::{decode_warnings, load_input, CommandResult};

pub fn run(args: &AlignArgs) -> Result<CommandResult, CliError> {
    let decoded = load_input(&args.input)?;
    let aligned = match args.mode {
        AlignMode::Union => align_union(&decoded.series),
        AlignMode::Intersection => align_common(&decoded.series),
    };

    let mut command_result =
        CommandResult::ok(serde_json::to_value(&aligned)?).with_warnings(decode_warnings(&decoded));
    if aligned.is_empty() {
        command_result = command_result.with_warning("no ticker has at least two aligned points");
    }

    Ok(command_result)
}
