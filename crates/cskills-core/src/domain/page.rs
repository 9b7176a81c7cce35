//! Page view-models for the generated site.
//!
//! Builders here only decide *what* a page says. Turning a [`PageView`] into
//! markup is the job of the `PageRenderer` port.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{self, ItemRecord};
use crate::domain::environment::{Environment, Registry};

pub const SITE_TITLE: &str = "CURSOR-SKILLS";
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/araguaci/cursor-skills";

/// Run-level values shown on every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Pre-formatted timestamp; the only value that differs between runs.
    pub generated_at: String,
    pub version: String,
    pub status: String,
    pub repository_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            generated_at: String::new(),
            version: "0.3.0".into(),
            status: "Production Ready".into(),
            repository_url: DEFAULT_REPOSITORY_URL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Not pointing inside the generated site.
    pub fn is_external(&self) -> bool {
        self.href.starts_with("http://") || self.href.starts_with("https://")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: Option<String>,
    pub links: Vec<Link>,
}

impl Section {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            links: Vec::new(),
        }
    }

    fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn link(mut self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.push(Link::new(label, href));
        self
    }

    fn items(mut self, base: &str, items: &[ItemRecord]) -> Self {
        self.links.extend(
            items
                .iter()
                .map(|item| Link::new(item.title, format!("{base}{}/", item.id))),
        );
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub generated_at: String,
    pub version: String,
    pub status: String,
    pub links: Vec<Link>,
}

/// Grid of cards (index) or two-column detail page (environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Cards,
    Detail,
}

/// Everything a renderer needs for one HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub layout: Layout,
    pub title: String,
    pub heading: String,
    pub tagline: String,
    pub back_link: Option<Link>,
    pub nav: Vec<Link>,
    pub sections: Vec<Section>,
    pub footer: Footer,
}

fn footer(site: &SiteInfo) -> Footer {
    Footer {
        generated_at: site.generated_at.clone(),
        version: format!("v{}", site.version.trim_start_matches('v')),
        status: site.status.clone(),
        links: vec![
            Link::new("View Changelog", "/docs/CHANGELOG.md"),
            Link::new("GitHub Repository", site.repository_url.clone()),
            Link::new("Contribute", "/docs/CONTRIBUTING.md"),
            Link::new("Documentation", "/docs/README.md"),
        ],
    }
}

fn env_tagline(env: Environment) -> String {
    format!("Development rules and best practices for {env} programming.")
}

/// Site landing page: one card per registry environment, then documentation links.
pub fn index_page(registry: &Registry, site: &SiteInfo) -> PageView {
    let mut sections: Vec<Section> = registry
        .iter()
        .map(|env| {
            Section::new(env.display_name())
                .describe(env_tagline(env))
                .link("Overview", format!("/environments/{env}/"))
                .link("Rules", format!("/environments/{env}/CURSOR.md"))
                .link("Analysis", format!("/environments/{env}/README.md"))
                .link("Templates", format!("/templates/{env}/"))
                .link("Examples", format!("/examples/{env}/"))
        })
        .collect();

    sections.push(
        Section::new("Documentation")
            .link("Main Documentation", "/docs/")
            .link("Contributing Guide", "/docs/CONTRIBUTING.md")
            .link("Changelog", "/docs/CHANGELOG.md")
            .link("CURSOR IDE Configurations", "/configs/"),
    );

    PageView {
        layout: Layout::Cards,
        title: format!("{SITE_TITLE} Community Repository"),
        heading: format!("{SITE_TITLE} Community Repository"),
        tagline: "A comprehensive repository of best practices, rules, and guidelines for \
                  working with CURSOR IDE across different programming environments."
            .into(),
        back_link: None,
        nav: Vec::new(),
        sections,
        footer: footer(site),
    }
}

/// Detail page for a single environment.
pub fn environment_page(env: Environment, site: &SiteInfo) -> PageView {
    let name = env.display_name();
    let templates_base = format!("/templates/{env}/");
    let examples_base = format!("/examples/{env}/");

    let sections = vec![
        Section::new("Rules & Guidelines")
            .link("CURSOR IDE Rules", format!("/environments/{env}/CURSOR.md"))
            .link(
                "Analysis & Best Practices",
                format!("/environments/{env}/README.md"),
            )
            .link("Detailed Documentation", format!("/environments/{env}/docs/")),
        Section::new("Templates")
            .link("All Templates", templates_base.clone())
            .items(&templates_base, catalog::starter_templates(env)),
        Section::new("Examples")
            .link("All Examples", examples_base.clone())
            .items(&examples_base, catalog::practical_examples(env)),
        Section::new("Configuration")
            .link("CURSOR IDE Settings", "/configs/")
            .link("Extensions", "/configs/extensions.json")
            .link("Settings", "/configs/settings.json")
            .link("Launch Configuration", "/configs/launch.json")
            .link(
                format!("{name} Settings"),
                format!("/configs/{env}/settings.json"),
            ),
    ];

    PageView {
        layout: Layout::Detail,
        title: format!("{SITE_TITLE} - {name}"),
        heading: format!("{SITE_TITLE} - {name}"),
        tagline: env_tagline(env),
        back_link: Some(Link::new(format!("Back to {SITE_TITLE}"), "/")),
        nav: vec![
            Link::new("Home", "/"),
            Link::new("Documentation", "/docs/"),
            Link::new("Templates", "/templates/"),
            Link::new("Examples", "/examples/"),
        ],
        sections,
        footer: footer(site),
    }
}
