//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use cskills_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SkillsResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and inspect
/// the other afterwards.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn insert_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.insert_dirs(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Every file under `root` keyed by its path relative to `root`.
    pub fn snapshot(&self, root: &Path) -> BTreeMap<PathBuf, String> {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .files
                    .iter()
                    .filter_map(|(path, content)| {
                        let rel = path.strip_prefix(root).ok()?;
                        Some((rel.to_path_buf(), content.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn read(&self) -> SkillsResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> SkillsResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }

    fn query(&self, f: impl FnOnce(&MemoryFilesystemInner) -> bool) -> bool {
        self.inner.read().map(|inner| f(&inner)).unwrap_or(false)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> cskills_core::error::SkillsError {
    ApplicationError::LockPoisoned {
        name: "memory filesystem",
    }
    .into()
}

fn not_found(path: &Path) -> cskills_core::error::SkillsError {
    ApplicationError::NotFound {
        path: path.to_path_buf(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.query(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.query(|inner| inner.is_dir(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.query(|inner| inner.files.contains_key(path))
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.query(|inner| inner.files.contains_key(path) && inner.executables.contains(path))
    }

    fn read_to_string(&self, path: &Path) -> SkillsResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn list_dir(&self, path: &Path) -> SkillsResult<Vec<String>> {
        let inner = self.read()?;
        if !inner.is_dir(path) {
            return Err(not_found(path));
        }

        let children: BTreeSet<String> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Ok(children.into_iter().collect())
    }

    fn walk_files(&self, root: &Path) -> SkillsResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.is_dir(root) && !inner.files.contains_key(root) {
            return Err(not_found(root));
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect())
    }

    fn create_dir_all(&self, path: &Path) -> SkillsResult<()> {
        self.write()?.insert_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SkillsResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.is_dir(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_recursive(&self, src: &Path, dest: &Path) -> SkillsResult<()> {
        let mut inner = self.write()?;

        if let Some(content) = inner.files.get(src).cloned() {
            if let Some(parent) = dest.parent() {
                inner.insert_dirs(parent);
            }
            inner.files.insert(dest.to_path_buf(), content);
            if inner.executables.contains(src) {
                inner.executables.insert(dest.to_path_buf());
            }
            return Ok(());
        }

        if !inner.is_dir(src) {
            return Err(not_found(src));
        }

        let rebase = |p: &Path| p.strip_prefix(src).ok().map(|rel| dest.join(rel));

        let dirs: Vec<PathBuf> = inner.directories.iter().filter_map(|d| rebase(d)).collect();
        let files: Vec<(PathBuf, String, bool)> = inner
            .files
            .iter()
            .filter_map(|(p, content)| {
                rebase(p).map(|target| (target, content.clone(), inner.executables.contains(p)))
            })
            .collect();

        inner.insert_dirs(dest);
        for dir in dirs {
            inner.insert_dirs(&dir);
        }
        for (target, content, executable) in files {
            if executable {
                inner.executables.insert(target.clone());
            }
            inner.files.insert(target, content);
        }
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> SkillsResult<()> {
        let mut inner = self.write()?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> SkillsResult<()> {
        let mut inner = self.write()?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));

        Ok(())
    }
}
