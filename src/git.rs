//! Version-control safety check run before any rename.
use std::path::Path;

use crate::error::SlugError;
use crate::exec::Executor;

/// Whether a path lies inside a git work tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    /// `git rev-parse` succeeded.
    Tracked,
    /// `git rev-parse` ran and failed.
    NotTracked,
    /// git is not installed or could not be started.
    Unavailable,
}

impl RepoStatus {
    /// Probe `path` (or its parent directory when `path` is a file).
    #[must_use]
    pub fn detect(executor: &dyn Executor, path: &Path) -> Self {
        if !executor.which("git") {
            return Self::Unavailable;
        }
        let dir = if path.is_dir() {
            path
        } else {
            path.parent().unwrap_or(path)
        };
        match executor.run_unchecked_in(dir, "git", &["rev-parse"]) {
            Ok(result) if result.success => Self::Tracked,
            Ok(_) => Self::NotTracked,
            Err(e) => {
                tracing::debug!("git rev-parse could not run: {e:#}");
                Self::Unavailable
            }
        }
    }

    /// `true` only for [`RepoStatus::Tracked`].
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        matches!(self, Self::Tracked)
    }

    /// Refuse to continue outside version control unless `force` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::NotVersionControlled`] or
    /// [`SlugError::GitUnavailable`] when the path is not known to be tracked
    /// and `force` is `false`.
    pub fn require_tracked(self, force: bool, path: &Path) -> Result<(), SlugError> {
        match (self, force) {
            (Self::Tracked, _) | (_, true) => Ok(()),
            (Self::NotTracked, false) => Err(SlugError::NotVersionControlled(path.to_path_buf())),
            (Self::Unavailable, false) => Err(SlugError::GitUnavailable(path.to_path_buf())),
        }
    }
}
