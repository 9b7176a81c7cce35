//! `cskills validate`, `cskills test` and `cskills lint`.
//!
//! The three suites share one handler; they differ only in the check groups
//! they run and the classification table they use.

use tracing::{info, instrument};

use cskills_adapters::LocalFilesystem;
use cskills_core::{
    application::AuditService,
    domain::{Suite, Verdict},
};

use crate::{
    cli::{AuditArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::tool_runner;

#[instrument(skip_all, fields(suite = suite.as_str()))]
pub fn execute(
    suite: Suite,
    args: AuditArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = config.root(&global);
    let registry = config.registry(&args.registry)?;
    let table = config.classification(suite)?;

    let service = AuditService::new(Box::new(LocalFilesystem::new()), tool_runner(args.skip_tools))
        .with_settings(config.audit.clone());
    let report = service.run(&root, &registry, &table);

    output.report(suite.as_str(), &report)?;

    let summary = report.summary();
    info!(
        total = summary.tally.total,
        failed = summary.tally.failed,
        "Suite finished"
    );
    match summary.verdict {
        Verdict::Failed => Err(CliError::ChecksFailed {
            suite: suite.as_str().into(),
            failed: summary.tally.failed,
        }),
        Verdict::Passed | Verdict::PassedWithWarnings => Ok(()),
    }
}
