//! Format Service - normalise sources in place.
//!
//! JavaScript and markdown go through prettier when it is installed. JSON
//! files are re-indented and markdown documents are normalised in-process,
//! so the report is useful even on a machine without node tooling.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, ToolRunner},
    domain::{
        ConfigKind, MarkdownNormalizer, Outcome, Registry, Report, editor_config::to_pretty_json,
    },
    error::{Context, SkillsError, SkillsResult},
};

/// Top-level documents run through the markdown normaliser.
pub const ROOT_DOCUMENTS: &[&str] = &[
    "README.md",
    "CURSOR.md",
    "CONTRIBUTING.md",
    "CHANGELOG.md",
    "PROJECT_STRUCTURE.md",
];

const STRUCTURE_DIRS: &[&str] = &["scripts", "configs"];

pub struct FormatService {
    filesystem: Box<dyn Filesystem>,
    tools: Box<dyn ToolRunner>,
}

impl FormatService {
    pub fn new(filesystem: Box<dyn Filesystem>, tools: Box<dyn ToolRunner>) -> Self {
        Self { filesystem, tools }
    }

    /// Format the repository at `root`. Always lenient: nothing here blocks
    /// a commit on its own.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn run(&self, root: &Path, registry: &Registry) -> SkillsResult<Report> {
        let normalizer = MarkdownNormalizer::new().context("compiling markdown patterns")?;
        let mut report = Report::lenient();

        self.prettier(&mut report, root, "JavaScript", &["--write", "scripts/**/*.js"]);
        self.prettier(
            &mut report,
            root,
            "Markdown",
            &["--write", "**/*.md", "--ignore-path", ".gitignore"],
        );

        let json_files = std::iter::once("package.json".to_string()).chain(
            ConfigKind::ALL
                .iter()
                .map(|k| format!("configs/{}", k.file_name())),
        );
        for rel in json_files {
            self.reindent_json(&mut report, root, &rel);
        }

        for dir in STRUCTURE_DIRS {
            let path = root.join(dir);
            let label = format!("Directory {dir}/");
            if self.filesystem.is_dir(&path) {
                report.record(label, Outcome::Pass, Some("exists".into()));
            } else {
                match self.filesystem.create_dir_all(&path) {
                    Ok(()) => report.record(
                        label,
                        Outcome::Pass,
                        Some("created".into()),
                    ),
                    Err(e) => report.fail(label, Some(format!("Error: {e}"))),
                }
            }
        }

        let env_documents = registry.iter().flat_map(|env| {
            ["CURSOR.md", "README.md"].map(move |doc| format!("{env}/{doc}"))
        });
        let documents = ROOT_DOCUMENTS
            .iter()
            .map(|d| (*d).to_string())
            .chain(env_documents);
        for rel in documents {
            self.normalize_markdown(&mut report, &normalizer, root, &rel);
        }

        let tally = report.tally();
        info!(
            passed = tally.passed,
            warned = tally.warned,
            failed = tally.failed,
            "Formatting completed"
        );
        Ok(report)
    }

    fn prettier(&self, report: &mut Report, root: &Path, language: &str, args: &[&str]) {
        let label = format!("{language} files formatted with prettier");
        if !self.tools.is_available(root, "prettier") {
            report.warn(label, Some("prettier not available".into()));
            return;
        }
        match self.tools.run(root, "prettier", args) {
            Ok(output) if output.success => report.pass(label),
            Ok(output) => report.fail(label, output.headline().map(str::to_string)),
            Err(e) => report.fail(label, Some(format!("Error: {e}"))),
        }
    }

    fn reindent_json(&self, report: &mut Report, root: &Path, rel: &str) {
        let path = root.join(rel);
        let label = format!("{rel} formatted");
        if !self.filesystem.is_file(&path) {
            report.warn(label, Some("not found".into()));
            return;
        }

        let result = self.filesystem.read_to_string(&path).and_then(|text| {
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| SkillsError::Configuration {
                    message: format!("{rel}: {e}"),
                })?;
            let pretty = to_pretty_json(&value);
            if pretty == text {
                return Ok(false);
            }
            self.filesystem.write_file(&path, &pretty)?;
            Ok(true)
        });

        match result {
            Ok(true) => {
                debug!(path = rel, "Re-indented");
                report.record(label, Outcome::Pass, Some("formatted".into()));
            }
            Ok(false) => report.record(
                label,
                Outcome::Pass,
                Some("already formatted".into()),
            ),
            Err(e) => report.fail(label, Some(format!("Error: {e}"))),
        }
    }

    fn normalize_markdown(
        &self,
        report: &mut Report,
        normalizer: &MarkdownNormalizer,
        root: &Path,
        rel: &str,
    ) {
        let path = root.join(rel);
        if !self.filesystem.is_file(&path) {
            return;
        }
        let label = format!("{rel} normalised");

        let result = self.filesystem.read_to_string(&path).and_then(|text| {
            let normalized = normalizer.normalize(&text);
            if normalized == text {
                return Ok(false);
            }
            self.filesystem.write_file(&path, &normalized)?;
            Ok(true)
        });

        match result {
            Ok(changed) => {
                let detail = if changed { "rewritten" } else { "unchanged" };
                report.record(label, Outcome::Pass, Some(detail.into()));
            }
            Err(e) => report.fail(label, Some(format!("Error: {e}"))),
        }
    }
}
