//! cskills Core - domain and application layers for the CURSOR-SKILLS
//! documentation tooling.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            cskills-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (Setup, Build, Audit, Format, Links)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  (Filesystem, PageRenderer, ToolRunner) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      cskills-adapters (Infrastructure)  │
//! │ (LocalFilesystem, HtmlRenderer, ...)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Domain Layer (Pure Logic)      │
//! │ (Registry, Report, PageView, policies)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use cskills_core::{
//!     application::{AuditService, Filesystem, ToolRunner},
//!     domain::{ClassificationTable, Registry, Suite},
//! };
//!
//! fn validate(fs: Box<dyn Filesystem>, tools: Box<dyn ToolRunner>) -> u8 {
//!     let report = AuditService::new(fs, tools).run(
//!         Path::new("."),
//!         &Registry::default(),
//!         &ClassificationTable::defaults(Suite::Validate),
//!     );
//!     report.summary().verdict.exit_code()
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AuditService, BuildRequest, BuildService, DocsService, FormatService, LinkCheckService,
        MirrorService, SetupService,
        ports::{Filesystem, PageRenderer, ToolOutput, ToolRunner},
    };
    pub use crate::domain::{
        ClassificationTable, ConfigKind, Environment, Mode, Outcome, Registry, Report, Severity,
        SiteInfo, Suite, Verdict,
    };
    pub use crate::error::{SkillsError, SkillsResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
