//! `cskills emit-config` - print one editor config as JSON.

use cskills_core::domain::editor_config::{emit_by_name, to_pretty_json};

use crate::{cli::EmitConfigArgs, error::CliResult, output::OutputManager};

/// Unknown environment names print the shaped empty default.
pub fn execute(args: EmitConfigArgs, output: OutputManager) -> CliResult<()> {
    let value = emit_by_name(&args.env, args.kind.into());
    output.raw(to_pretty_json(&value).trim_end())?;
    Ok(())
}
