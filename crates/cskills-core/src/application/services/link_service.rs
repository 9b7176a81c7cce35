//! Link Check Service - find internal links in the built site that point at
//! nothing.
//!
//! Works offline against the output tree: every `href` in every `.html`
//! file is resolved to a path and looked up through the [`Filesystem`] port.

use std::path::{Component, Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::Report,
    error::{Context, SkillsResult},
};

const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:", "javascript:", "//"];

/// A link whose target is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// Page the link was found on, relative to the site root.
    pub page: PathBuf,
    pub href: String,
}

/// Outcome of a link check.
#[derive(Debug, Clone)]
pub struct LinkReport {
    pub report: Report,
    pub links_checked: usize,
    pub broken: Vec<BrokenLink>,
}

impl LinkReport {
    /// JSON document written to the `brokenlinks_*.log` file.
    pub fn to_log_json(&self, base: &str, generated_at: &str) -> serde_json::Value {
        json!({
            "base": base,
            "generated_at": generated_at,
            "total_links_checked": self.links_checked,
            "total_broken_links": self.broken.len(),
            "broken_links": self.broken,
        })
    }
}

/// `href` of `<a>` elements only; `<link>` tags and `data-href` are ignored.
const ANCHOR_HREF: &str = r#"(?is)<a\s(?:[^>]*?\s)?href\s*=\s*["']([^"']*)["']"#;

pub struct LinkCheckService {
    filesystem: Box<dyn Filesystem>,
}

impl LinkCheckService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(site = %site_root.display()))]
    pub fn check(&self, site_root: &Path) -> SkillsResult<LinkReport> {
        let href = Regex::new(ANCHOR_HREF).context("compiling href pattern")?;

        let mut report = Report::strict();
        let mut links_checked = 0;
        let mut broken = Vec::new();

        let pages = self
            .filesystem
            .walk_files(site_root)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "html"));

        for page in pages {
            let relative_page = page.strip_prefix(site_root).unwrap_or(&page).to_path_buf();
            let html = self.filesystem.read_to_string(&page)?;
            let page_dir = page.parent().unwrap_or(site_root);

            let mut page_broken = 0;
            for caps in href.captures_iter(&html) {
                let raw = caps[1].replace("&amp;", "&");
                let Some(target) = resolve(site_root, page_dir, &raw) else {
                    continue;
                };
                links_checked += 1;

                if !self.filesystem.exists(&target) {
                    warn!(page = %relative_page.display(), href = %raw, "Broken link");
                    page_broken += 1;
                    broken.push(BrokenLink {
                        page: relative_page.clone(),
                        href: raw,
                    });
                }
            }

            let label = format!("{} links resolve", relative_page.display());
            if page_broken == 0 {
                report.pass(label);
            } else {
                report.fail(label, Some(format!("{page_broken} broken")));
            }
            debug!(page = %relative_page.display(), broken = page_broken, "Page checked");
        }

        info!(links_checked, broken = broken.len(), "Link check completed");
        Ok(LinkReport {
            report,
            links_checked,
            broken,
        })
    }
}

/// Map an `href` to the file it names, or `None` for links that are not
/// checked (external schemes, fragments, empty).
fn resolve(site_root: &Path, page_dir: &Path, href: &str) -> Option<PathBuf> {
    let trimmed = href.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || EXTERNAL_PREFIXES
            .iter()
            .any(|p| trimmed.get(..p.len()).is_some_and(|head| head.eq_ignore_ascii_case(p)))
    {
        return None;
    }

    let path = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    if path.is_empty() {
        return None;
    }

    let (base, rel) = match path.strip_prefix('/') {
        Some(rest) => (site_root, rest),
        None => (page_dir, path),
    };
    Some(normalize(&base.join(rel)))
}

/// Lexically fold `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
