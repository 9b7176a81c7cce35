//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A path that had to exist did not.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// An external tool could not be started.
    #[error("Failed to run {tool}: {reason}")]
    ExternalTool { tool: String, reason: String },

    /// Page rendering failed.
    #[error("Page rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state is poisoned: {name}")]
    LockPoisoned { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::NotFound { path } => vec![
                format!("Expected to find: {}", path.display()),
                "Pass --root to point at the documentation repository".into(),
            ],
            Self::ExternalTool { tool, .. } => vec![
                format!("Install {tool} locally with: npm install --save-dev {tool}"),
                "Tools are looked up in node_modules/.bin".into(),
            ],
            Self::RenderingFailed { .. } | Self::LockPoisoned { .. } => {
                vec!["Check the error details above".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Filesystem,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::ExternalTool { .. } => ErrorCategory::ExternalTool,
            Self::RenderingFailed { .. } | Self::LockPoisoned { .. } => ErrorCategory::Internal,
        }
    }
}
