//! Driven (output) ports - implemented by infrastructure.

use std::path::{Path, PathBuf};

use crate::domain::PageView;
use crate::error::SkillsResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cskills_adapters::filesystem::LocalFilesystem` (production)
/// - `cskills_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Query methods (`exists`, `is_dir`, ...) never fail; a path that cannot be
/// inspected is reported as absent.
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Whether any execute bit is set.
    fn is_executable(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> SkillsResult<String>;

    /// Names of the immediate children of `path`, sorted.
    fn list_dir(&self, path: &Path) -> SkillsResult<Vec<String>>;

    /// Every regular file below `root`, sorted.
    fn walk_files(&self, root: &Path) -> SkillsResult<Vec<PathBuf>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SkillsResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> SkillsResult<()>;

    /// Copy a file or directory tree, creating `dest`'s ancestors and
    /// overwriting whatever is already there.
    fn copy_recursive(&self, src: &Path, dest: &Path) -> SkillsResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> SkillsResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SkillsResult<()>;
}

/// Port for page rendering.
///
/// Implemented by `cskills_adapters::renderer::HtmlRenderer`.
pub trait PageRenderer: Send + Sync {
    /// Render a complete document. Every interpolated value is escaped.
    fn render(&self, page: &PageView) -> SkillsResult<String>;

    /// Shared stylesheet written to `assets/styles.css`.
    fn stylesheet(&self) -> String;
}

/// Captured result of an external tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Last non-empty line of stderr (or stdout), for one-line reports.
    pub fn headline(&self) -> Option<&str> {
        fn last_line(text: &str) -> Option<&str> {
            text.lines().map(str::trim).filter(|l| !l.is_empty()).last()
        }
        last_line(&self.stderr).or_else(|| last_line(&self.stdout))
    }
}

/// Port for third-party linters and formatters.
///
/// Implemented by `cskills_adapters::tools::NodeToolRunner`.
pub trait ToolRunner: Send + Sync {
    /// Whether `tool` is installed for the project at `root`.
    fn is_available(&self, root: &Path, tool: &str) -> bool;

    /// Run `tool` with `args` from `root`. A non-zero exit is `Ok` with
    /// `success == false`; only a failure to start is an error.
    fn run(&self, root: &Path, tool: &str, args: &[&str]) -> SkillsResult<ToolOutput>;
}
