//! Setup Service - scaffold the documentation repository skeleton.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        ConfigKind, Environment, ItemRecord, Registry,
        catalog::{practical_examples, starter_templates},
        editor_config::{emit, emit_shared, template_settings, to_pretty_json},
    },
    error::SkillsResult,
};

/// Subdirectories every environment carries.
pub const ENVIRONMENT_SUBDIRS: &[&str] = &["scripts", "templates", "examples", "configs", "docs"];

/// Counts and paths produced by a setup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupSummary {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

pub struct SetupService {
    filesystem: Box<dyn Filesystem>,
}

impl SetupService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Create the environment tree, starter templates, practical examples and
    /// editor configs. Existing files are overwritten.
    #[instrument(skip_all, fields(root = %root.display(), environments = registry.len()))]
    pub fn run(&self, root: &Path, registry: &Registry) -> SkillsResult<SetupSummary> {
        let mut summary = SetupSummary::default();

        info!("Creating directory structure");
        for top in ["scripts", "configs"] {
            self.dir(&mut summary, root.join(top))?;
        }
        for env in registry.iter() {
            for sub in ENVIRONMENT_SUBDIRS {
                self.dir(&mut summary, root.join(env.as_str()).join(sub))?;
            }
        }

        info!("Creating project templates");
        for env in registry.iter() {
            for template in starter_templates(env) {
                let dir = root.join(env.as_str()).join("templates").join(template.id);
                self.write_template(&mut summary, &dir, env, template)?;
            }
        }

        info!("Creating editor configurations");
        for kind in ConfigKind::ALL {
            let path = root.join("configs").join(kind.file_name());
            self.file(&mut summary, path, &to_pretty_json(&emit_shared(kind)))?;
        }
        for env in registry.iter() {
            for kind in ConfigKind::ALL {
                let path = root.join(env.as_str()).join("configs").join(kind.file_name());
                self.file(&mut summary, path, &to_pretty_json(&emit(env, kind)))?;
            }
        }

        info!("Creating practical examples");
        for env in registry.iter() {
            for example in practical_examples(env) {
                let dir = root.join(env.as_str()).join("examples").join(example.id);
                self.write_example(&mut summary, &dir, env, example)?;
            }
        }

        info!(
            directories = summary.directories.len(),
            files = summary.files.len(),
            "Setup completed"
        );
        Ok(summary)
    }

    fn write_template(
        &self,
        summary: &mut SetupSummary,
        dir: &Path,
        env: Environment,
        template: &ItemRecord,
    ) -> SkillsResult<()> {
        self.dir(summary, dir.join(".cursor"))?;

        let readme = format!(
            "# {} Template\n\n{}.\n\nThis is a template for {env} development.\n",
            template.title, template.description
        );
        let manifest = json!({
            "name": template.id,
            "version": "1.0.0",
            "description": format!("Template for {env} development"),
            "main": "index.js",
            "scripts": {
                "start": "echo \"Starting template...\"",
                "test": "echo \"Running tests...\""
            }
        });

        self.file(summary, dir.join("README.md"), &readme)?;
        self.file(summary, dir.join("package.json"), &to_pretty_json(&manifest))?;
        self.file(
            summary,
            dir.join(".cursor").join("settings.json"),
            &to_pretty_json(&template_settings()),
        )
    }

    fn write_example(
        &self,
        summary: &mut SetupSummary,
        dir: &Path,
        env: Environment,
        example: &ItemRecord,
    ) -> SkillsResult<()> {
        self.dir(summary, dir.to_path_buf())?;

        let readme = format!(
            "# {}\n\n{}. This is a practical example for {env} development.\n\n\
             ## Usage\n\n```bash\n# Run the example\nnpm start\n```\n",
            example.title, example.description
        );
        let script = format!(
            "// {id} Example\nconsole.log('Hello from {id}!');\n",
            id = example.id
        );
        let manifest = json!({
            "name": example.id,
            "version": "1.0.0",
            "description": format!("Example for {env} development"),
            "main": "index.js",
            "scripts": { "start": "node index.js" }
        });

        self.file(summary, dir.join("README.md"), &readme)?;
        self.file(summary, dir.join("index.js"), &script)?;
        self.file(summary, dir.join("package.json"), &to_pretty_json(&manifest))
    }

    fn dir(&self, summary: &mut SetupSummary, path: PathBuf) -> SkillsResult<()> {
        self.filesystem.create_dir_all(&path)?;
        debug!(path = %path.display(), "Directory ready");
        summary.directories.push(path);
        Ok(())
    }

    fn file(&self, summary: &mut SetupSummary, path: PathBuf, content: &str) -> SkillsResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, content)?;
        debug!(path = %path.display(), "Wrote file");
        summary.files.push(path);
        Ok(())
    }
}
