//! Runs project-local node tooling from `node_modules/.bin`.

use std::path::{Path, PathBuf};
use std::process::Command;

use cskills_core::{
    application::{
        ApplicationError,
        ports::{ToolOutput, ToolRunner},
    },
    error::SkillsResult,
};
use tracing::{debug, instrument};

/// Production tool runner. Only binaries installed under the project's
/// `node_modules/.bin` are considered available; nothing is fetched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeToolRunner;

impl NodeToolRunner {
    pub fn new() -> Self {
        Self
    }

    fn binary(root: &Path, tool: &str) -> PathBuf {
        let bin = root.join("node_modules").join(".bin");
        if cfg!(windows) {
            bin.join(format!("{tool}.cmd"))
        } else {
            bin.join(tool)
        }
    }
}

impl ToolRunner for NodeToolRunner {
    fn is_available(&self, root: &Path, tool: &str) -> bool {
        Self::binary(root, tool).is_file()
    }

    #[instrument(skip(self, root))]
    fn run(&self, root: &Path, tool: &str, args: &[&str]) -> SkillsResult<ToolOutput> {
        let output = Command::new(Self::binary(root, tool))
            .args(args)
            .current_dir(root)
            .output()
            .map_err(|e| ApplicationError::ExternalTool {
                tool: tool.to_string(),
                reason: e.to_string(),
            })?;

        debug!(status = ?output.status.code(), "Tool finished");
        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn tools_outside_node_modules_are_unavailable() {
        let tmp = TempDir::new().unwrap();
        let runner = NodeToolRunner::new();
        assert!(!runner.is_available(tmp.path(), "eslint"));
    }

    #[test]
    fn missing_binary_is_an_external_tool_error() {
        let tmp = TempDir::new().unwrap();
        let err = NodeToolRunner::new()
            .run(tmp.path(), "prettier", &["--version"])
            .unwrap_err();
        assert!(err.to_string().contains("prettier"));
    }
}
