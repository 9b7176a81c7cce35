//! Audit Service - the validate, test and lint suites.
//!
//! A suite is an ordered list of [`CheckGroup`]s. Each group builds its own
//! [`Report`] and the suite merges them in order, so groups can be run and
//! tested in isolation. Whether a falsy check warns or fails is decided by
//! the [`ClassificationTable`] handed in by the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, ToolRunner},
    application::services::setup_service::ENVIRONMENT_SUBDIRS,
    domain::{CheckKind, ClassificationTable, ConfigKind, Outcome, Registry, Report, Suite},
    error::{SkillsError, SkillsResult},
};

/// Header every environment `CURSOR.md` starts with.
pub const ENV_RULES_HEADER: &str = "# CURSOR IDE Rules";
/// Header the top-level `CURSOR.md` carries.
pub const ROOT_RULES_HEADER: &str = "# CURSOR IDE Best Practices";

/// Repository facts the suites check against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    /// Top-level files that must exist.
    pub required_files: Vec<String>,
    /// Files expected under `scripts/`.
    pub required_scripts: Vec<String>,
    /// Expected `name` in `package.json`.
    pub package_name: String,
    /// Keys expected under `scripts` in `package.json`.
    pub package_scripts: Vec<String>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            required_files: owned(&[
                "README.md",
                "CURSOR.md",
                "CONTRIBUTING.md",
                "LICENSE",
                "CHANGELOG.md",
                "package.json",
                "PROJECT_STRUCTURE.md",
            ]),
            required_scripts: owned(&[
                "setup.js",
                "validate.js",
                "build.js",
                "test.js",
                "docs.js",
                "lint.js",
                "format.js",
            ]),
            package_name: "cursor-skills".into(),
            package_scripts: owned(&[
                "setup", "validate", "build", "test", "docs", "lint", "format",
            ]),
        }
    }
}

/// Independently runnable group of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckGroup {
    /// Main directories, environment directories and their subdirectories.
    Structure,
    /// Top-level required files.
    RequiredFiles,
    /// `package.json` parse, name and scripts.
    PackageManifest,
    /// Top-level `README.md` and `CURSOR.md` content.
    RootContent,
    /// Presence of `<env>/CURSOR.md` and `<env>/README.md`.
    EnvironmentDocs,
    /// Substance of each registry environment's `CURSOR.md`.
    EnvironmentContent,
    /// `scripts/*.js` presence, permissions and shebang.
    Scripts,
    Templates,
    Examples,
    /// `configs/*.json` presence and validity.
    Configs,
    /// eslint and markdownlint, when installed.
    ExternalLinters,
    /// JSON validity of the manifest and shared configs.
    JsonFiles,
    /// Required documents and their length.
    Documentation,
}

impl CheckGroup {
    /// Groups a suite runs, in order.
    pub const fn for_suite(suite: Suite) -> &'static [CheckGroup] {
        use CheckGroup::*;
        match suite {
            Suite::Validate => &[
                Structure,
                RequiredFiles,
                EnvironmentDocs,
                PackageManifest,
                EnvironmentContent,
                Scripts,
                Templates,
                Examples,
                Configs,
            ],
            Suite::Test => &[
                Structure,
                RequiredFiles,
                PackageManifest,
                RootContent,
                EnvironmentContent,
                Scripts,
                Templates,
                Examples,
                Configs,
            ],
            Suite::Lint => &[
                ExternalLinters,
                JsonFiles,
                Structure,
                Documentation,
                EnvironmentDocs,
            ],
        }
    }
}

pub struct AuditService {
    filesystem: Box<dyn Filesystem>,
    tools: Box<dyn ToolRunner>,
    settings: AuditSettings,
}

impl AuditService {
    pub fn new(filesystem: Box<dyn Filesystem>, tools: Box<dyn ToolRunner>) -> Self {
        Self {
            filesystem,
            tools,
            settings: AuditSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: AuditSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run every group of `table.suite()` against `root`.
    #[instrument(skip_all, fields(suite = %table.suite(), root = %root.display()))]
    pub fn run(&self, root: &Path, registry: &Registry, table: &ClassificationTable) -> Report {
        let mut report = Report::new(table.suite().mode());
        for group in CheckGroup::for_suite(table.suite()) {
            debug!(?group, "Running check group");
            report.merge(self.run_group(*group, root, registry, table));
        }

        let tally = report.tally();
        info!(
            passed = tally.passed,
            warned = tally.warned,
            failed = tally.failed,
            "Audit completed"
        );
        report
    }

    /// Run a single group; the report uses the suite's mode.
    pub fn run_group(
        &self,
        group: CheckGroup,
        root: &Path,
        registry: &Registry,
        table: &ClassificationTable,
    ) -> Report {
        let checks = Checks {
            fs: self.filesystem.as_ref(),
            tools: self.tools.as_ref(),
            settings: &self.settings,
            root,
            registry,
            table,
        };
        let mut report = Report::new(table.suite().mode());
        match group {
            CheckGroup::Structure => checks.structure(&mut report),
            CheckGroup::RequiredFiles => checks.required_files(&mut report),
            CheckGroup::PackageManifest => checks.package_manifest(&mut report),
            CheckGroup::RootContent => checks.root_content(&mut report),
            CheckGroup::EnvironmentDocs => checks.environment_docs(&mut report),
            CheckGroup::EnvironmentContent => checks.environment_content(&mut report),
            CheckGroup::Scripts => checks.scripts(&mut report),
            CheckGroup::Templates => checks.catalog_dirs(&mut report, CatalogDir::Templates),
            CheckGroup::Examples => checks.catalog_dirs(&mut report, CatalogDir::Examples),
            CheckGroup::Configs => checks.configs(&mut report),
            CheckGroup::ExternalLinters => checks.external_linters(&mut report),
            CheckGroup::JsonFiles => checks.json_files(&mut report),
            CheckGroup::Documentation => checks.documentation(&mut report),
        }
        report
    }
}

// ── Check library ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum CatalogDir {
    Templates,
    Examples,
}

struct Checks<'a> {
    fs: &'a dyn Filesystem,
    tools: &'a dyn ToolRunner,
    settings: &'a AuditSettings,
    root: &'a Path,
    registry: &'a Registry,
    table: &'a ClassificationTable,
}

impl Checks<'_> {
    fn suite(&self) -> Suite {
        self.table.suite()
    }

    fn check<F>(&self, report: &mut Report, label: impl Into<String>, kind: CheckKind, f: F)
    where
        F: FnOnce() -> SkillsResult<bool>,
    {
        report.run_check(label, self.table.severity(kind), f);
    }

    fn exists(&self, rel: &str) -> bool {
        self.fs.exists(&self.root.join(rel))
    }

    fn read(&self, rel: &str) -> SkillsResult<String> {
        self.fs.read_to_string(&self.root.join(rel))
    }

    fn parses_as_json(&self, rel: &str) -> SkillsResult<bool> {
        let text = self.read(rel)?;
        serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
            SkillsError::Configuration {
                message: format!("{rel}: {e}"),
            }
        })?;
        Ok(true)
    }

    fn present_environments(&self) -> impl Iterator<Item = crate::domain::Environment> + '_ {
        self.registry
            .iter()
            .filter(move |env| self.fs.is_dir(&self.root.join(env.as_str())))
    }

    fn structure(&self, report: &mut Report) {
        let main_dirs: &[&str] = match self.suite() {
            Suite::Validate => &["scripts", "configs", "templates", "examples"],
            Suite::Test | Suite::Lint => &["scripts", "configs"],
        };
        for dir in main_dirs {
            self.check(
                report,
                format!("Main directory {dir}/ exists"),
                CheckKind::MainDirectory,
                || Ok(self.fs.is_dir(&self.root.join(dir))),
            );
        }

        for env in self.registry.iter() {
            let env_dir = self.root.join(env.as_str());
            let present = self.fs.is_dir(&env_dir);
            self.check(
                report,
                format!("Environment {env}/ exists"),
                CheckKind::EnvironmentDirectory,
                || Ok(present),
            );

            if present && self.suite() != Suite::Test {
                for sub in ENVIRONMENT_SUBDIRS {
                    self.check(
                        report,
                        format!("{env}/{sub}/ exists"),
                        CheckKind::EnvironmentSubdirectory,
                        || Ok(self.fs.is_dir(&env_dir.join(sub))),
                    );
                }
            }
        }
    }

    fn required_files(&self, report: &mut Report) {
        for file in &self.settings.required_files {
            self.check(
                report,
                format!("Required file {file} exists"),
                CheckKind::RequiredFile,
                || Ok(self.exists(file)),
            );
        }
    }

    fn package_manifest(&self, report: &mut Report) {
        const MANIFEST: &str = "package.json";

        if self.suite() == Suite::Test {
            self.check(
                report,
                "package.json is valid JSON",
                CheckKind::PackageJsonValid,
                || self.parses_as_json(MANIFEST),
            );
            return;
        }

        if !self.exists(MANIFEST) {
            return;
        }

        let parsed = self.read(MANIFEST).and_then(|text| {
            serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
                SkillsError::Configuration {
                    message: format!("{MANIFEST}: {e}"),
                }
            })
        });

        let manifest = match parsed {
            Ok(value) => value,
            Err(e) => {
                report.record(
                    "package.json is valid JSON",
                    Outcome::for_falsy(self.table.severity(CheckKind::PackageJsonValid)),
                    Some(format!("Error: {e}")),
                );
                return;
            }
        };

        self.check(
            report,
            "package.json has correct name",
            CheckKind::PackageName,
            || Ok(manifest["name"].as_str() == Some(self.settings.package_name.as_str())),
        );

        if let Some(scripts) = manifest["scripts"].as_object() {
            for name in &self.settings.package_scripts {
                self.check(
                    report,
                    format!("Script '{name}' defined"),
                    CheckKind::PackageScript,
                    || Ok(scripts.get(name).is_some_and(|v| !v.is_null())),
                );
            }
        }
    }

    fn root_content(&self, report: &mut Report) {
        self.check(
            report,
            "README.md has substantial content",
            CheckKind::RootReadmeContent,
            || {
                let text = self.read("README.md")?;
                Ok(text.chars().count() > 1000 && text.contains("CURSOR-SKILLS"))
            },
        );
        self.check(
            report,
            "CURSOR.md has proper structure",
            CheckKind::RootCursorContent,
            || {
                let text = self.read("CURSOR.md")?;
                Ok(text.contains(ROOT_RULES_HEADER) && text.chars().count() > 2000)
            },
        );
    }

    fn environment_docs(&self, report: &mut Report) {
        for env in self.present_environments() {
            let cursor = format!("{env}/CURSOR.md");
            let readme = format!("{env}/README.md");

            let has_cursor = self.exists(&cursor);
            self.check(
                report,
                format!("{cursor} exists"),
                CheckKind::EnvCursorDoc,
                || Ok(has_cursor),
            );
            if has_cursor && self.suite() == Suite::Lint {
                self.check(
                    report,
                    format!("{cursor} has proper header"),
                    CheckKind::EnvCursorHeader,
                    || Ok(self.read(&cursor)?.contains(ENV_RULES_HEADER)),
                );
            }

            self.check(
                report,
                format!("{readme} exists"),
                CheckKind::EnvReadme,
                || Ok(self.exists(&readme)),
            );
        }
    }

    /// One substance check per present environment; a missing file is falsy.
    fn environment_content(&self, report: &mut Report) {
        let (min_chars, header_required) = match self.suite() {
            Suite::Test => (500, true),
            Suite::Validate | Suite::Lint => (1000, false),
        };

        for env in self.present_environments() {
            let cursor = format!("{env}/CURSOR.md");
            let has_cursor = self.exists(&cursor);

            if has_cursor && !header_required {
                self.check(
                    report,
                    format!("{cursor} has proper header"),
                    CheckKind::EnvCursorHeader,
                    || Ok(self.read(&cursor)?.contains(ENV_RULES_HEADER)),
                );
            }

            self.check(
                report,
                format!("{cursor} has substantial content"),
                CheckKind::EnvCursorSubstance,
                || {
                    if !has_cursor {
                        return Ok(false);
                    }
                    let text = self.read(&cursor)?;
                    let long_enough = text.chars().count() > min_chars;
                    Ok(long_enough && (!header_required || text.contains(ENV_RULES_HEADER)))
                },
            );
        }
    }

    fn scripts(&self, report: &mut Report) {
        let dir = self.root.join("scripts");

        for script in &self.settings.required_scripts {
            let path = dir.join(script);
            let present = self.fs.is_file(&path);

            if self.suite() == Suite::Test {
                self.check(
                    report,
                    format!("Script {script} exists and is executable"),
                    CheckKind::ScriptPresent,
                    || Ok(present && self.fs.is_executable(&path)),
                );
                continue;
            }

            self.check(
                report,
                format!("Script {script} exists"),
                CheckKind::ScriptPresent,
                || Ok(present),
            );
            if present {
                self.check(
                    report,
                    format!("Script {script} is executable"),
                    CheckKind::ScriptExecutable,
                    || Ok(self.fs.is_executable(&path)),
                );
            }
        }

        if self.suite() == Suite::Test {
            if let Some(first) = self.settings.required_scripts.first() {
                let path = dir.join(first);
                self.check(
                    report,
                    "Scripts have proper shebang",
                    CheckKind::ScriptShebang,
                    || Ok(self.fs.read_to_string(&path)?.starts_with("#!/usr/bin/env node")),
                );
            }
        }
    }

    fn catalog_dirs(&self, report: &mut Report, which: CatalogDir) {
        let (dir_name, noun, present_kind, readme_kind, noun_title) = match which {
            CatalogDir::Templates => (
                "templates",
                "template",
                CheckKind::TemplatesPresent,
                CheckKind::TemplateReadme,
                "Template",
            ),
            CatalogDir::Examples => (
                "examples",
                "example",
                CheckKind::ExamplesPresent,
                CheckKind::ExampleReadme,
                "Example",
            ),
        };

        for env in self.registry.iter() {
            let dir = self.root.join(env.as_str()).join(dir_name);
            if !self.fs.is_dir(&dir) {
                continue;
            }

            let entries = match self.fs.list_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    report.fail(format!("{env}/{dir_name}/ is readable"), Some(format!("Error: {e}")));
                    continue;
                }
            };

            self.check(
                report,
                format!("{env}/{dir_name}/ has {noun}s ({} found)", entries.len()),
                present_kind,
                || Ok(!entries.is_empty()),
            );

            for entry in &entries {
                let item = dir.join(entry);
                if !self.fs.is_dir(&item) {
                    continue;
                }
                self.check(
                    report,
                    format!("{noun_title} {env}/{entry} has README.md"),
                    readme_kind,
                    || Ok(self.fs.is_file(&item.join("README.md"))),
                );
                if matches!(which, CatalogDir::Templates) {
                    self.check(
                        report,
                        format!("{noun_title} {env}/{entry} has package.json"),
                        CheckKind::TemplateManifest,
                        || Ok(self.fs.is_file(&item.join("package.json"))),
                    );
                }
            }
        }
    }

    fn configs(&self, report: &mut Report) {
        for kind in ConfigKind::ALL {
            let rel = format!("configs/{}", kind.file_name());
            let name = kind.file_name();
            let present = self.exists(&rel);

            if self.suite() == Suite::Test {
                self.check(
                    report,
                    format!("Configuration {name} exists and is valid JSON"),
                    CheckKind::ConfigPresent,
                    || if present { self.parses_as_json(&rel) } else { Ok(false) },
                );
                continue;
            }

            self.check(
                report,
                format!("Configuration {name} exists"),
                CheckKind::ConfigPresent,
                || Ok(present),
            );
            if present {
                self.check(
                    report,
                    format!("Configuration {name} is valid JSON"),
                    CheckKind::JsonValid,
                    || self.parses_as_json(&rel),
                );
            }
        }
    }

    fn external_linters(&self, report: &mut Report) {
        let linters: [(&str, &str, &[&str]); 2] = [
            ("eslint", "JavaScript", &["scripts/", "--format=compact"]),
            ("markdownlint", "Markdown", &["**/*.md", "--ignore", "node_modules"]),
        ];

        for (tool, language, args) in linters {
            let label = format!("{language} files linted with {tool}");

            if !self.tools.is_available(self.root, tool) {
                report.record(
                    label,
                    Outcome::for_falsy(self.table.severity(CheckKind::ExternalLinter)),
                    Some(format!("{tool} not available, skipping {language} linting")),
                );
                continue;
            }

            match self.tools.run(self.root, tool, args) {
                Ok(output) if output.success => report.pass(label),
                Ok(output) => report.fail(label, output.headline().map(str::to_string)),
                Err(e) => report.fail(label, Some(format!("Error: {e}"))),
            }
        }
    }

    fn json_files(&self, report: &mut Report) {
        let files = std::iter::once("package.json".to_string()).chain(
            ConfigKind::ALL
                .iter()
                .map(|k| format!("configs/{}", k.file_name())),
        );

        for rel in files {
            let label = format!("{rel} is valid JSON");
            if !self.exists(&rel) {
                report.record(
                    label,
                    Outcome::for_falsy(self.table.severity(CheckKind::ConfigPresent)),
                    Some("not found".into()),
                );
                continue;
            }
            self.check(report, label, CheckKind::JsonValid, || self.parses_as_json(&rel));
        }
    }

    fn documentation(&self, report: &mut Report) {
        let docs = self
            .settings
            .required_files
            .iter()
            .filter(|f| !f.ends_with(".json"));

        for doc in docs {
            let present = self.exists(doc);
            self.check(
                report,
                format!("{doc} exists"),
                CheckKind::RequiredFile,
                || Ok(present),
            );
            if present {
                self.check(
                    report,
                    format!("{doc} has substantial content"),
                    CheckKind::DocSubstance,
                    || Ok(self.read(doc)?.chars().count() > 100),
                );
            }
        }
    }
}
