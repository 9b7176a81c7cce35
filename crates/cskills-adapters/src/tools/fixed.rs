//! Scripted tool runner for tests and `--skip-tools` runs.

use std::collections::BTreeMap;
use std::path::Path;

use cskills_core::{
    application::{
        ApplicationError,
        ports::{ToolOutput, ToolRunner},
    },
    error::SkillsResult,
};

/// Answers from a fixed table instead of spawning processes. Tools without
/// an entry are reported as not installed.
#[derive(Debug, Clone, Default)]
pub struct StaticToolRunner {
    outputs: BTreeMap<String, ToolOutput>,
}

impl StaticToolRunner {
    /// Runner with no tools installed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Register `tool` as installed, answering every run with `output`.
    pub fn with_tool(mut self, tool: impl Into<String>, output: ToolOutput) -> Self {
        self.outputs.insert(tool.into(), output);
        self
    }
}

impl ToolRunner for StaticToolRunner {
    fn is_available(&self, _root: &Path, tool: &str) -> bool {
        self.outputs.contains_key(tool)
    }

    fn run(&self, _root: &Path, tool: &str, _args: &[&str]) -> SkillsResult<ToolOutput> {
        self.outputs.get(tool).cloned().ok_or_else(|| {
            ApplicationError::ExternalTool {
                tool: tool.to_string(),
                reason: "not installed".into(),
            }
            .into()
        })
    }
}
