//! `cskills setup` - scaffold the environment tree.

use tracing::instrument;

use cskills_adapters::LocalFilesystem;
use cskills_core::application::SetupService;

use crate::{
    cli::{GlobalArgs, RegistryArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: RegistryArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = config.root(&global);
    let registry = config.registry(&args)?;

    output.header("Setting up CURSOR-SKILLS")?;
    let summary = SetupService::new(Box::new(LocalFilesystem::new())).run(&root, &registry)?;

    output.success(&format!(
        "Created {} directories and {} files for {} environment(s)",
        summary.directories.len(),
        summary.files.len(),
        registry.len(),
    ))?;
    output.info("Next: run 'cskills build' to generate the site")?;
    Ok(())
}
