//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the walker and the change
//! applier never touch [`std::fs`] directly. Production code uses
//! [`SystemFileSystemOps`]; dry runs wrap it in [`SimulatedFileSystemOps`],
//! which records renames in memory and answers queries as if they had
//! happened.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::exec::Executor;

/// Abstraction over the filesystem queries and the single mutation the
/// engine performs.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if any entry (including a dangling symlink) is at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file, following symlinks.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` if `path` itself is a symbolic link.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Returns the immediate child paths inside `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be opened or read as a directory.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Rename `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Returns `true` if `a` and `b` name the same filesystem entry, as on a
    /// case-insensitive filesystem where `Notes` and `notes` are one file.
    fn same_entry(&self, a: &Path, b: &Path) -> bool;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
///
/// When built with [`with_git`](Self::with_git), renames are first attempted
/// with `git mv` so history follows the file; a refused `git mv` (untracked
/// file, path outside the work tree) falls back to a plain rename.
#[derive(Debug, Default, Clone)]
pub struct SystemFileSystemOps {
    git: Option<Arc<dyn Executor>>,
}

impl SystemFileSystemOps {
    /// Plain filesystem access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route renames through `git mv` using `executor`.
    #[must_use]
    pub fn with_git(executor: Arc<dyn Executor>) -> Self {
        Self {
            git: Some(executor),
        }
    }

    fn git_mv(&self, from: &Path, to: &Path) -> bool {
        let Some(git) = &self.git else {
            return false;
        };
        let (Some(dir), Some(from_str), Some(to_str)) = (from.parent(), from.to_str(), to.to_str())
        else {
            return false;
        };
        git.run_in(dir, "git", &["mv", "--", from_str, to_str]).is_ok()
    }
}

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        std::fs::read_dir(path)?
            .map(|e| e.map(|entry| entry.path()).map_err(Into::into))
            .collect()
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        if self.git_mv(from, to) {
            return Ok(());
        }
        std::fs::rename(from, to)
    }

    #[cfg(unix)]
    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt as _;
        match (a.symlink_metadata(), b.symlink_metadata()) {
            (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        match (dunce::canonicalize(a), dunce::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }
}

/// Dry-run overlay over another [`FileSystemOps`].
///
/// Renames are recorded instead of performed. Every query translates the
/// logical path (as the walker sees it after earlier renames) back to the
/// physical path on disk, so the walk behaves exactly as a real run would:
/// renamed directories are descended under their new names and vacated
/// names no longer exist.
#[derive(Debug)]
pub struct SimulatedFileSystemOps<'a> {
    inner: &'a dyn FileSystemOps,
    /// `(new, old)` logical paths in rename order.
    renames: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl<'a> SimulatedFileSystemOps<'a> {
    /// Wrap `inner`; nothing is renamed on it.
    #[must_use]
    pub fn new(inner: &'a dyn FileSystemOps) -> Self {
        Self {
            inner,
            renames: Mutex::new(Vec::new()),
        }
    }

    /// Resolve a logical path to `Some(physical)`, or `None` if the logical
    /// path names something that has been renamed away.
    ///
    /// Replays the recorded renames backwards: a path under a rename's target
    /// moves back under its source, and a path under a rename's source did
    /// not exist after that rename.
    fn resolve(&self, logical: &Path) -> Option<PathBuf> {
        let renames = self
            .renames
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut current = logical.to_path_buf();
        for (new, old) in renames.iter().rev() {
            if let Ok(rest) = current.strip_prefix(new) {
                current = if rest.as_os_str().is_empty() {
                    old.clone()
                } else {
                    old.join(rest)
                };
            } else if current.starts_with(old) {
                return None;
            }
        }
        drop(renames);
        Some(current)
    }
}

impl FileSystemOps for SimulatedFileSystemOps<'_> {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_some_and(|p| self.inner.exists(&p))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_some_and(|p| self.inner.is_dir(&p))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_some_and(|p| self.inner.is_file(&p))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.resolve(path).is_some_and(|p| self.inner.is_symlink(&p))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let Some(physical) = self.resolve(path) else {
            anyhow::bail!("{} was renamed during this run", path.display());
        };
        Ok(self
            .inner
            .read_dir(&physical)?
            .into_iter()
            .filter_map(|child| child.file_name().map(|name| path.join(name)))
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        if !self.exists(from) {
            return Err(std::io::Error::from(std::io::ErrorKind::NotFound));
        }
        self.renames
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((to.to_path_buf(), from.to_path_buf()));
        Ok(())
    }

    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        match (self.resolve(a), self.resolve(b)) {
            (Some(pa), Some(pb)) => pa == pb || self.inner.same_entry(&pa, &pb),
            _ => false,
        }
    }
}

/// [`FileSystemOps`] over a real directory that refuses selected operations.
///
/// Used by unit tests to provoke permission failures without depending on
/// the privileges of the user running the tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    inner: SystemFileSystemOps,
    deny_rename: Vec<PathBuf>,
    deny_read_dir: Vec<PathBuf>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create a mock that behaves like the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make renaming `path` fail with `PermissionDenied`.
    #[must_use]
    pub fn deny_rename(mut self, path: impl Into<PathBuf>) -> Self {
        self.deny_rename.push(path.into());
        self
    }

    /// Make listing `path` fail.
    #[must_use]
    pub fn deny_read_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.deny_read_dir.push(path.into());
        self
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.inner.is_symlink(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if self.deny_read_dir.iter().any(|p| p == path) {
            anyhow::bail!("mock: permission denied listing {}", path.display());
        }
        self.inner.read_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        if self.deny_rename.iter().any(|p| p == from) {
            return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        }
        self.inner.rename(from, to)
    }

    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        self.inner.same_entry(a, b)
    }
}
