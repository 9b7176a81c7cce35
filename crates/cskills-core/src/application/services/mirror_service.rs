//! Mirror Service - copy a list of relative paths between two roots.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::DomainError,
    error::SkillsResult,
};

/// What a mirror run did, by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub copied: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl MirrorSummary {
    pub fn absorb(&mut self, other: MirrorSummary) {
        self.copied.extend(other.copied);
        self.skipped.extend(other.skipped);
    }
}

/// Standalone mirroring use case.
pub struct MirrorService {
    filesystem: Box<dyn Filesystem>,
}

impl MirrorService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Copy every path in `relative` that exists under `src_root` to the same
    /// relative location under `dest_root`.
    ///
    /// Missing sources are skipped. The first copy error aborts the run;
    /// copies made before it stay in place.
    #[instrument(skip_all, fields(src = %src_root.display(), dest = %dest_root.display()))]
    pub fn mirror<P: AsRef<Path>>(
        &self,
        src_root: &Path,
        dest_root: &Path,
        relative: &[P],
    ) -> SkillsResult<MirrorSummary> {
        let summary = mirror_paths(self.filesystem.as_ref(), src_root, dest_root, relative)?;
        info!(
            copied = summary.copied.len(),
            skipped = summary.skipped.len(),
            "Mirror completed"
        );
        Ok(summary)
    }
}

pub(crate) fn mirror_paths<P: AsRef<Path>>(
    fs: &dyn Filesystem,
    src_root: &Path,
    dest_root: &Path,
    relative: &[P],
) -> SkillsResult<MirrorSummary> {
    let mut summary = MirrorSummary::default();

    for rel in relative {
        let rel = checked_relative(rel.as_ref())?;
        let src = src_root.join(rel);

        if !fs.exists(&src) {
            debug!(path = %src.display(), "Source missing, skipped");
            summary.skipped.push(rel.to_path_buf());
            continue;
        }

        fs.copy_recursive(&src, &dest_root.join(rel))?;
        debug!(path = %rel.display(), "Copied");
        summary.copied.push(rel.to_path_buf());
    }

    Ok(summary)
}

/// Reject paths that would leave the root they are joined to.
pub(crate) fn checked_relative(path: &Path) -> Result<&Path, DomainError> {
    let escapes = path.as_os_str().is_empty()
        || path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

    if escapes {
        return Err(DomainError::PathEscapesRoot {
            path: path.display().to_string(),
        });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_relative_paths_are_accepted() {
        assert!(checked_relative(Path::new("docs/guide.md")).is_ok());
        assert!(checked_relative(Path::new("./LICENSE")).is_ok());
    }

    #[test]
    fn escaping_paths_are_rejected() {
        for bad in ["../secret", "/etc/passwd", "a/../../b", ""] {
            assert!(
                matches!(
                    checked_relative(Path::new(bad)),
                    Err(DomainError::PathEscapesRoot { .. })
                ),
                "{bad}"
            );
        }
    }
}
