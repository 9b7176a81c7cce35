// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("unknown environment '{name}'")]
    UnknownEnvironment { name: String },

    #[error("environment '{name}' listed more than once")]
    DuplicateEnvironment { name: String },

    #[error("unknown check kind '{name}'")]
    UnknownCheckKind { name: String },

    #[error("unknown severity '{name}' (expected 'required' or 'recommended')")]
    UnknownSeverity { name: String },

    #[error("unknown config kind '{name}'")]
    UnknownConfigKind { name: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("relative path must stay inside the project: {path}")]
    PathEscapesRoot { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownEnvironment { name } | Self::DuplicateEnvironment { name } => vec![
                format!("Check the environment list near '{name}'"),
                "Known environments: php, webdesign, python, node, api, integrations, \
                 mobile, devops, testing"
                    .into(),
            ],
            Self::UnknownSeverity { .. } => {
                vec!["Use 'required' (fails the run) or 'recommended' (warns)".into()]
            }
            Self::UnknownConfigKind { .. } => {
                vec!["Known config kinds: settings, extensions, launch, tasks".into()]
            }
            Self::UnknownCheckKind { .. } => {
                vec!["Run 'cskills config list' to see the policy keys in use".into()]
            }
            Self::PathEscapesRoot { .. } => {
                vec!["Use a path relative to the project root without '..'".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PathEscapesRoot { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
