//! Application layer for cskills.
//!
//! This layer contains:
//! - **Services**: one per top-level operation (setup, build, audit, ...)
//! - **Ports**: traits for the filesystem, page rendering and external tools
//! - **Errors**: orchestration failures
//!
//! Services coordinate the domain layer; the rules themselves live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AuditService, AuditSettings, BrokenLink, BuildRequest, BuildService, BuildSummary,
    CheckGroup, DocsService, FormatService, LinkCheckService, LinkReport, MirrorService,
    MirrorSummary, SetupService, SetupSummary,
};

pub use ports::{Filesystem, PageRenderer, ToolOutput, ToolRunner};

pub use error::ApplicationError;
