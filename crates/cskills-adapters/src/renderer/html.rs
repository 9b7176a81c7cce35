//! HTML renderer built on maud.
//!
//! Every value from a [`PageView`] is interpolated through maud, which
//! escapes text and attribute values.

use cskills_core::{
    application::ports::PageRenderer,
    domain::{Footer, Layout, Link, PageView, Section},
    error::SkillsResult,
};
use maud::{DOCTYPE, Markup, html};
use tracing::instrument;

const CSS: &str = include_str!("../../static/styles.css");

/// Renders page views to standalone HTML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl PageRenderer for HtmlRenderer {
    #[instrument(skip_all, fields(title = %page.title))]
    fn render(&self, page: &PageView) -> SkillsResult<String> {
        let body = match page.layout {
            Layout::Cards => cards_body(page),
            Layout::Detail => detail_body(page),
        };
        Ok(base_document(page, body).into_string())
    }

    fn stylesheet(&self) -> String {
        CSS.to_string()
    }
}

// ── Components ───────────────────────────────────────────────────────────────

fn base_document(page: &PageView, content: Markup) -> Markup {
    let body_class = match page.layout {
        Layout::Cards => "cards",
        Layout::Detail => "detail",
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title) }
                link rel="stylesheet" href="/assets/styles.css";
            }
            body class=(body_class) {
                div.container {
                    (content)
                    (footer(&page.footer))
                }
            }
        }
    }
}

fn header(page: &PageView) -> Markup {
    html! {
        div.header {
            h1 { (page.heading) }
            p { (page.tagline) }
        }
    }
}

fn link(link: &Link) -> Markup {
    html! {
        @if link.is_external() {
            a href=(link.href) target="_blank" rel="noopener" { (link.label) }
        } @else {
            a href=(link.href) { (link.label) }
        }
    }
}

fn links(links: &[Link]) -> Markup {
    html! {
        div.links {
            @for l in links {
                (link(l))
            }
        }
    }
}

fn footer(footer: &Footer) -> Markup {
    html! {
        div.footer {
            div.footer-info {
                div.footer-item {
                    strong { "Last Updated:" }
                    br;
                    (footer.generated_at)
                }
                div.footer-item {
                    strong { "Version:" }
                    br;
                    (footer.version)
                }
                div.footer-item {
                    strong { "Status:" }
                    br;
                    (footer.status)
                }
            }
            div.footer-links {
                @for l in &footer.links {
                    (link(l))
                }
            }
        }
    }
}

// ── Layouts ──────────────────────────────────────────────────────────────────

/// Described sections become environment cards; the rest follow the grid.
fn cards_body(page: &PageView) -> Markup {
    let (cards, trailing): (Vec<&Section>, Vec<&Section>) =
        page.sections.iter().partition(|s| s.description.is_some());

    html! {
        (header(page))
        div.environments {
            @for section in &cards {
                div.environment {
                    h3 { (section.title) }
                    @if let Some(description) = &section.description {
                        p { (description) }
                    }
                    (links(&section.links))
                }
            }
        }
        @for section in &trailing {
            div.documentation {
                h2 { (section.title) }
                (links(&section.links))
            }
        }
    }
}

fn detail_body(page: &PageView) -> Markup {
    html! {
        @if let Some(back) = &page.back_link {
            a.back-link href=(back.href) { "← " (back.label) }
        }
        (header(page))
        @if !page.nav.is_empty() {
            div.nav {
                @for l in &page.nav {
                    (link(l))
                }
            }
        }
        div.content {
            @for section in &page.sections {
                div.section {
                    h3 { (section.title) }
                    @if let Some(description) = &section.description {
                        p { (description) }
                    }
                    (links(&section.links))
                }
            }
        }
    }
}
