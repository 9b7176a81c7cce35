//! Application services - orchestrate use cases.
//!
//! One service per top-level operation. Each takes its ports as boxed trait
//! objects, so the CLI wires real adapters and tests wire in-memory ones.

pub mod audit_service;
pub mod build_service;
pub mod docs_service;
pub mod format_service;
pub mod link_service;
pub mod mirror_service;
pub mod setup_service;

pub use audit_service::{AuditService, AuditSettings, CheckGroup};
pub use build_service::{BuildRequest, BuildService, BuildSummary};
pub use docs_service::DocsService;
pub use format_service::FormatService;
pub use link_service::{BrokenLink, LinkCheckService, LinkReport};
pub use mirror_service::{MirrorService, MirrorSummary};
pub use setup_service::{SetupService, SetupSummary};
