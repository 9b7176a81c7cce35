//! `cskills build` and `cskills pages`.

use tracing::instrument;

use cskills_adapters::{HtmlRenderer, LocalFilesystem};
use cskills_core::application::{BuildRequest, BuildService};

use crate::{
    cli::{BuildArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::generated_at;

/// Full site build.
#[instrument(skip_all)]
pub fn execute(
    args: BuildArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let req = request(&args, &global, &config)?;
    output.header("Building CURSOR-SKILLS")?;

    let summary = service().build(&req)?;

    output.success(&format!(
        "Mirrored {} path(s), skipped {} missing",
        summary.mirrored.copied.len(),
        summary.mirrored.skipped.len(),
    ))?;
    output.success(&format!("Generated {} environment page(s)", summary.pages.len()))?;
    output.success(&format!("Site written to {}", req.output_dir.display()))?;
    Ok(())
}

/// Regenerate only the environment pages.
#[instrument(skip_all)]
pub fn pages(
    args: BuildArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let req = request(&args, &global, &config)?;

    let pages = service().pages(&req)?;
    for page in &pages {
        output.print(&format!("  {}", page.display()))?;
    }
    output.success(&format!("Generated {} environment page(s)", pages.len()))?;
    Ok(())
}

fn service() -> BuildService {
    BuildService::new(Box::new(LocalFilesystem::new()), Box::new(HtmlRenderer::new()))
}

fn request(args: &BuildArgs, global: &GlobalArgs, config: &AppConfig) -> CliResult<BuildRequest> {
    let root = config.root(global);
    Ok(BuildRequest {
        output_dir: config.output_dir(&root, args.output.as_ref()),
        registry: config.registry(&args.registry)?,
        site: config.site_info(generated_at()),
        root,
    })
}
