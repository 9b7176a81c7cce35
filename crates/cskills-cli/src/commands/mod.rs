//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core requests, wire adapters into
//! services, and print results. No business logic lives here.

pub mod audit;
pub mod build;
pub mod check_links;
pub mod completions;
pub mod config;
pub mod docs;
pub mod emit_config;
pub mod format;
pub mod init;
pub mod setup;

use cskills_adapters::{NodeToolRunner, StaticToolRunner};
use cskills_core::application::ToolRunner;

/// Human timestamp shown in page footers, e.g. `March 4, 2026 at 09:15`.
pub(crate) fn generated_at() -> String {
    chrono::Local::now().format("%B %-d, %Y at %H:%M").to_string()
}

/// Tool runner honouring `--skip-tools`.
pub(crate) fn tool_runner(skip_tools: bool) -> Box<dyn ToolRunner> {
    if skip_tools {
        Box::new(StaticToolRunner::none())
    } else {
        Box::new(NodeToolRunner::new())
    }
}
