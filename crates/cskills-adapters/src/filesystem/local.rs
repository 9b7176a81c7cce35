//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use cskills_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SkillsError, SkillsResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_executable(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::metadata(path)
                .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
                .unwrap_or(false)
        }
        #[cfg(not(unix))]
        {
            path.is_file()
        }
    }

    fn read_to_string(&self, path: &Path) -> SkillsResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn list_dir(&self, path: &Path) -> SkillsResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn walk_files(&self, root: &Path) -> SkillsResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn create_dir_all(&self, path: &Path) -> SkillsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SkillsResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_recursive(&self, src: &Path, dest: &Path) -> SkillsResult<()> {
        if src.is_file() {
            return copy_file(src, dest);
        }

        for entry in WalkDir::new(src).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(src, e))?;
            let relative = entry.path().strip_prefix(src).map_err(|e| {
                SkillsError::from(ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                })
            })?;
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir_all(&target)?;
            } else if entry.file_type().is_file() {
                copy_file(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> SkillsResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(if executable { mode | 0o111 } else { mode & !0o111 });
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = (path, executable);
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> SkillsResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

/// `std::fs::copy` keeps the permission bits, so copied scripts stay executable.
fn copy_file(src: &Path, dest: &Path) -> SkillsResult<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create directory"))?;
    }
    std::fs::copy(src, dest).map_err(|e| map_io_error(src, e, "copy file"))?;
    trace!(src = %src.display(), dest = %dest.display(), "Copied file");
    Ok(())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SkillsError {
    if e.kind() == io::ErrorKind::NotFound {
        return ApplicationError::NotFound {
            path: path.to_path_buf(),
        }
        .into();
    }

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn walk_error(root: &Path, e: walkdir::Error) -> SkillsError {
    let path = e.path().unwrap_or(root).to_path_buf();
    match e.into_io_error() {
        Some(io) => map_io_error(&path, io, "walk directory"),
        None => ApplicationError::FilesystemError {
            path,
            reason: "Failed to walk directory: filesystem loop".into(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_recursive_creates_ancestors_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let src = tmp.path().join("src/templates/a");
        fs.create_dir_all(&src.join("nested")).unwrap();
        fs.write_file(&src.join("README.md"), "new").unwrap();
        fs.write_file(&src.join("nested/x.json"), "{}").unwrap();

        let dest = tmp.path().join("out/deep/a");
        fs.create_dir_all(&dest).unwrap();
        fs.write_file(&dest.join("README.md"), "old").unwrap();

        fs.copy_recursive(&src, &dest).unwrap();

        assert_eq!(fs.read_to_string(&dest.join("README.md")).unwrap(), "new");
        assert!(fs.is_file(&dest.join("nested/x.json")));
    }

    #[test]
    fn walk_and_list_are_sorted() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        for name in ["b.html", "a.html", "sub/c.html"] {
            let path = tmp.path().join(name);
            fs.create_dir_all(path.parent().unwrap()).unwrap();
            fs.write_file(&path, "").unwrap();
        }

        assert_eq!(fs.list_dir(tmp.path()).unwrap(), vec!["a.html", "b.html", "sub"]);
        let walked = fs.walk_files(tmp.path()).unwrap();
        assert_eq!(walked.len(), 3);
        assert!(walked[0].ends_with("a.html"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&tmp.path().join("nope.md"))
            .unwrap_err();
        assert!(matches!(
            err,
            SkillsError::Application(ApplicationError::NotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_round_trips() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let script = tmp.path().join("setup.js");
        fs.write_file(&script, "#!/usr/bin/env node\n").unwrap();

        assert!(!fs.is_executable(&script));
        fs.set_permissions(&script, true).unwrap();
        assert!(fs.is_executable(&script));
        fs.set_permissions(&script, false).unwrap();
        assert!(!fs.is_executable(&script));
    }
}
