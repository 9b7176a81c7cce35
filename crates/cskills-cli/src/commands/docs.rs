//! `cskills docs` - write the markdown guides.

use tracing::instrument;

use cskills_adapters::LocalFilesystem;
use cskills_core::application::DocsService;

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

    output.header("Generating documentation")?;
    let written = DocsService::new(Box::new(LocalFilesystem::new())).generate(&root, &registry)?;

    for path in &written {
        let shown = path.strip_prefix(&root).unwrap_or(path);
        output.print(&format!("  {}", shown.display()))?;
    }
    output.success(&format!("Wrote {} documentation file(s)", written.len()))?;
    Ok(())
}
