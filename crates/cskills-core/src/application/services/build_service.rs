//! Build Service - assemble the static site under the output directory.
//!
//! The pipeline mirrors source documents, templates, examples and configs
//! into the output tree, then writes the generated pages. Every step either
//! creates or overwrites, so re-running over the same source is safe.

use std::path::{Component, Path, PathBuf};

use serde_json::json;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PageRenderer},
        services::mirror_service::{MirrorSummary, mirror_paths},
    },
    domain::{
        Environment, Registry, SiteInfo,
        editor_config::to_pretty_json,
        page::{environment_page, index_page},
    },
    error::SkillsResult,
};

/// Top-level documents copied to `<out>/docs/`.
pub const SITE_DOCS: &[&str] = &[
    "README.md",
    "CURSOR.md",
    "CONTRIBUTING.md",
    "LICENSE",
    "CHANGELOG.md",
];

/// Per-environment sources copied to `<out>/environments/<env>/`.
const ENVIRONMENT_DOCS: &[&str] = &["CURSOR.md", "README.md", "docs"];

/// Directories created at the top of the output tree.
pub const OUTPUT_LAYOUT: &[&str] = &[
    "environments",
    "templates",
    "examples",
    "configs",
    "assets",
    "docs",
];

/// Inputs for a build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Documentation repository root.
    pub root: PathBuf,
    /// Output directory (absolute, or already joined to `root`).
    pub output_dir: PathBuf,
    pub registry: Registry,
    pub site: SiteInfo,
}

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub mirrored: MirrorSummary,
    pub pages: Vec<PathBuf>,
    pub generated: Vec<PathBuf>,
}

pub struct BuildService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn PageRenderer>,
}

impl BuildService {
    pub fn new(filesystem: Box<dyn Filesystem>, renderer: Box<dyn PageRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Full site build.
    #[instrument(skip_all, fields(root = %req.root.display(), out = %req.output_dir.display()))]
    pub fn build(&self, req: &BuildRequest) -> SkillsResult<BuildSummary> {
        let out = req.output_dir.as_path();
        let mut summary = BuildSummary::default();

        self.clean(&req.root, out)?;
        for dir in OUTPUT_LAYOUT {
            self.filesystem.create_dir_all(&out.join(dir))?;
        }

        info!("Mirroring documentation");
        summary.mirrored.absorb(mirror_paths(
            self.filesystem.as_ref(),
            &req.root,
            &out.join("docs"),
            SITE_DOCS,
        )?);
        for env in self.present_environments(req) {
            let dest = out.join("environments").join(env.as_str());
            self.filesystem.create_dir_all(&dest)?;
            summary.mirrored.absorb(mirror_paths(
                self.filesystem.as_ref(),
                &req.root.join(env.as_str()),
                &dest,
                ENVIRONMENT_DOCS,
            )?);
        }

        info!("Mirroring templates and examples");
        for env in req.registry.iter() {
            for kind in ["templates", "examples"] {
                let src = req.root.join(env.as_str()).join(kind);
                let dest = out.join(kind).join(env.as_str());
                summary
                    .mirrored
                    .absorb(self.mirror_children(&src, &dest, true)?);
            }
        }

        info!("Mirroring configurations");
        summary.mirrored.absorb(mirror_paths(
            self.filesystem.as_ref(),
            &req.root,
            out,
            &["configs"],
        )?);
        for env in req.registry.iter() {
            let src = req.root.join(env.as_str()).join("configs");
            let dest = out.join("configs").join(env.as_str());
            summary
                .mirrored
                .absorb(self.mirror_children(&src, &dest, false)?);
        }

        info!("Generating pages");
        let index = out.join("index.html");
        let html = self.renderer.render(&index_page(&req.registry, &req.site))?;
        self.filesystem.write_file(&index, &html)?;
        summary.generated.push(index);

        let manifest = out.join("package.json");
        self.filesystem
            .write_file(&manifest, &to_pretty_json(&build_manifest(&req.site)))?;
        summary.generated.push(manifest);

        summary.pages = self.write_environment_pages(req)?;

        let css = out.join("assets").join("styles.css");
        self.filesystem.write_file(&css, &self.renderer.stylesheet())?;
        summary.generated.push(css);

        info!(
            copied = summary.mirrored.copied.len(),
            pages = summary.pages.len(),
            "Build completed"
        );
        Ok(summary)
    }

    /// Regenerate only `environments/<env>/index.html`.
    #[instrument(skip_all, fields(out = %req.output_dir.display()))]
    pub fn pages(&self, req: &BuildRequest) -> SkillsResult<Vec<PathBuf>> {
        let pages = self.write_environment_pages(req)?;
        info!(pages = pages.len(), "Environment pages generated");
        Ok(pages)
    }

    fn write_environment_pages(&self, req: &BuildRequest) -> SkillsResult<Vec<PathBuf>> {
        req.registry
            .iter()
            .map(|env| {
                let dir = req.output_dir.join("environments").join(env.as_str());
                self.filesystem.create_dir_all(&dir)?;
                let path = dir.join("index.html");
                let html = self.renderer.render(&environment_page(env, &req.site))?;
                self.filesystem.write_file(&path, &html)?;
                debug!(env = %env, "Generated page");
                Ok(path)
            })
            .collect()
    }

    fn clean(&self, root: &Path, out: &Path) -> SkillsResult<()> {
        if normalized(root).starts_with(normalized(out)) {
            return Err(ApplicationError::FilesystemError {
                path: out.to_path_buf(),
                reason: "output directory must not contain the source root".into(),
            }
            .into());
        }
        if self.filesystem.exists(out) {
            debug!(path = %out.display(), "Removing previous output");
            self.filesystem.remove_dir_all(out)?;
        }
        self.filesystem.create_dir_all(out)
    }

    fn present_environments<'a>(
        &'a self,
        req: &'a BuildRequest,
    ) -> impl Iterator<Item = Environment> + 'a {
        req.registry
            .iter()
            .filter(move |env| self.filesystem.is_dir(&req.root.join(env.as_str())))
    }

    /// Mirror the children of `src` into `dest`; `dirs_only` drops loose files.
    fn mirror_children(
        &self,
        src: &Path,
        dest: &Path,
        dirs_only: bool,
    ) -> SkillsResult<MirrorSummary> {
        if !self.filesystem.is_dir(src) {
            return Ok(MirrorSummary::default());
        }
        self.filesystem.create_dir_all(dest)?;

        let children: Vec<String> = self
            .filesystem
            .list_dir(src)?
            .into_iter()
            .filter(|name| !dirs_only || self.filesystem.is_dir(&src.join(name)))
            .collect();

        mirror_paths(self.filesystem.as_ref(), src, dest, &children)
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn normalized(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute
        .components()
        .fold(PathBuf::new(), |mut acc, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    acc.pop();
                }
                other => acc.push(other.as_os_str()),
            }
            acc
        })
}

/// `package.json` written at the root of the output tree.
pub fn build_manifest(site: &SiteInfo) -> serde_json::Value {
    json!({
        "name": "cursor-skills-build",
        "version": site.version.trim_start_matches('v'),
        "description": "Built CURSOR-SKILLS documentation and assets",
        "main": "index.html",
        "scripts": {
            "start": "python -m http.server 8000",
            "serve": "npx serve ."
        },
        "keywords": ["cursor", "ide", "development", "best-practices"],
        "author": "CURSOR-SKILLS Community",
        "license": "MIT"
    })
}
