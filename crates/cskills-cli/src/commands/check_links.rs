//! `cskills check-links` - offline broken-link audit of a built site.

use std::path::PathBuf;

use tracing::instrument;

use cskills_adapters::LocalFilesystem;
use cskills_core::{application::LinkCheckService, domain::editor_config::to_pretty_json};

use crate::{
    cli::{CheckLinksArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: CheckLinksArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = config.root(&global);
    let site = match &args.dir {
        Some(dir) => root.join(dir),
        None => config.output_dir(&root, None),
    };

    if !site.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a built site; run 'cskills build' first", site.display()),
            source: None,
        });
    }

    let result = LinkCheckService::new(Box::new(LocalFilesystem::new())).check(&site)?;
    output.report("check-links", &result.report)?;
    output.info(&format!("{} internal link(s) checked", result.links_checked))?;

    if args.log {
        let dir = args.log_dir.clone().unwrap_or_else(|| root.clone());
        let path = write_log(&dir, &site.display().to_string(), &result)?;
        output.info(&format!("Log written to {}", path.display()))?;
    }

    if result.broken.is_empty() {
        Ok(())
    } else {
        Err(CliError::ChecksFailed {
            suite: "check-links".into(),
            failed: result.broken.len(),
        })
    }
}

/// Write `brokenlinks_<timestamp>.log` into `dir`.
fn write_log(
    dir: &std::path::Path,
    base: &str,
    result: &cskills_core::application::LinkReport,
) -> CliResult<PathBuf> {
    let now = chrono::Local::now();
    let path = dir.join(log_file_name(&now));
    let body = to_pretty_json(&result.to_log_json(base, &now.to_rfc3339()));

    std::fs::create_dir_all(dir)
        .with_cli_context(|| format!("Failed to create log directory '{}'", dir.display()))?;
    std::fs::write(&path, body)
        .with_cli_context(|| format!("Failed to write link log '{}'", path.display()))?;
    Ok(path)
}

fn log_file_name<Tz: chrono::TimeZone>(at: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("brokenlinks_{}.log", at.format("%Y-%m-%d_%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn log_file_name_is_timestamped() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 9, 5, 7).unwrap();
        assert_eq!(log_file_name(&at), "brokenlinks_2026-03-04_09-05-07.log");
    }
}
