//! Domain layer for cskills.
//!
//! Pure values and lookup tables: no filesystem, no process spawning, no
//! clock. Everything that touches the outside world goes through the ports in
//! `crate::application::ports`.

pub mod catalog;
pub mod editor_config;
pub mod environment;
pub mod error;
pub mod markdown;
pub mod page;
pub mod policy;
pub mod report;

pub use catalog::{ItemRecord, Tooling};
pub use editor_config::ConfigKind;
pub use environment::{Environment, Registry};
pub use error::{DomainError, ErrorCategory};
pub use markdown::MarkdownNormalizer;
pub use page::{Footer, Layout, Link, PageView, Section, SiteInfo};
pub use policy::{CheckKind, ClassificationTable, Severity, Suite};
pub use report::{Mode, Outcome, Report, ReportEntry, Summary, Tally, Verdict};
