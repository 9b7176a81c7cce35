//! `cskills format` - format sources in place.

use tracing::instrument;

use cskills_adapters::LocalFilesystem;
use cskills_core::{application::FormatService, domain::Verdict};

use crate::{
    cli::{AuditArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::tool_runner;

#[instrument(skip_all)]
pub fn execute(
    args: AuditArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = config.root(&global);
    let registry = config.registry(&args.registry)?;

    let report = FormatService::new(Box::new(LocalFilesystem::new()), tool_runner(args.skip_tools))
        .run(&root, &registry)?;

    output.report("format", &report)?;

    let summary = report.summary();
    if summary.verdict == Verdict::Failed {
        return Err(CliError::ChecksFailed {
            suite: "format".into(),
            failed: summary.tally.failed,
        });
    }
    Ok(())
}
