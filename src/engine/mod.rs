//! Rename engine: walks a tree, computes slugified names and applies them.
//!
//! [`run`] is the entry point. Every per-path result is reported to an
//! [`EventSink`] as an [`Event`] and counted in the returned [`Stats`];
//! only a missing start path is an error.
pub mod apply;
mod outcome;
pub mod walker;

use std::path::{Component, Path, PathBuf};

pub use outcome::{Event, Outcome, Stats};

use crate::config::Config;
use crate::error::SlugError;
use crate::ignore::IgnoreMatcher;
use crate::logging::EventSink;
use crate::operations::{FileSystemOps, SimulatedFileSystemOps};

/// Shared state for one walk.
#[derive(Debug)]
pub struct Context<'a> {
    /// Run configuration.
    pub config: &'a Config,
    /// Filesystem access; the dry-run overlay when simulating.
    pub fs: &'a dyn FileSystemOps,
    /// Where events go.
    pub sink: &'a dyn EventSink,
    /// Directory that reported, matched and measured paths are relative to.
    pub base: PathBuf,
    /// Compiled ignore globs.
    pub ignore: IgnoreMatcher,
}

impl<'a> Context<'a> {
    /// Build a context walking relative to `base`.
    #[must_use]
    pub fn new(
        config: &'a Config,
        fs: &'a dyn FileSystemOps,
        sink: &'a dyn EventSink,
        base: &Path,
    ) -> Self {
        Self {
            config,
            fs,
            sink,
            base: base.to_path_buf(),
            ignore: IgnoreMatcher::new(config.ignore_globs.iter().cloned()),
        }
    }

    /// `path` relative to the walk base, `/`-separated, `.` for the base.
    #[must_use]
    pub fn display(&self, path: &Path) -> String {
        let Ok(rel) = path.strip_prefix(&self.base) else {
            return path.display().to_string();
        };
        let parts: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }

    /// Report `outcome` for `path` and count it.
    pub fn emit(&self, path: &str, outcome: Outcome) -> Stats {
        let stats = Stats::of(&outcome);
        self.sink.record(&Event::new(path, outcome));
        stats
    }
}

/// Normalize every name under `start`.
///
/// With `config.ignore_root` (forced when `start` has no parent), `start`
/// itself keeps its name. Paths are reported relative to a kept start
/// directory, and otherwise relative to the parent of `start`. Under `config.dry_run` nothing on disk
/// changes.
///
/// # Errors
///
/// Returns [`SlugError::PathNotFound`] if `start` does not exist. Per-path
/// failures are not errors; check [`Stats::success`].
pub fn run(
    config: &Config,
    start: &Path,
    fs: &dyn FileSystemOps,
    sink: &dyn EventSink,
) -> Result<Stats, SlugError> {
    if !fs.exists(start) {
        return Err(SlugError::PathNotFound(start.to_path_buf()));
    }

    let parent = start
        .parent()
        .filter(|p| start.file_name().is_some() && !p.as_os_str().is_empty());
    let ignore_root = config.ignore_root || parent.is_none();
    // A kept start file is still reported by name, so only a directory
    // becomes the base.
    let base = match parent {
        Some(parent) if !config.ignore_root || !fs.is_dir(start) => parent.to_path_buf(),
        _ => start.to_path_buf(),
    };

    let simulated;
    let fs: &dyn FileSystemOps = if config.dry_run {
        simulated = SimulatedFileSystemOps::new(fs);
        &simulated
    } else {
        fs
    };

    let ctx = Context::new(config, fs, sink, &base);
    tracing::debug!(base = %base.display(), ignore_root, "walking {}", start.display());
    Ok(walker::process_path(
        &ctx,
        start.to_path_buf(),
        ignore_root,
        config.no_recurse,
    ))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use crate::operations::SystemFileSystemOps;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("My Folder");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("README.md"), "").unwrap();
        fs::write(folder.join("Draft One.txt"), "").unwrap();
        dir
    }

    #[test]
    fn missing_start_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (config, fs_ops, sink) = (Config::default(), SystemFileSystemOps::new(), MemorySink::new());
        let err = run(&config, &dir.path().join("nope"), &fs_ops, &sink).unwrap_err();
        assert!(matches!(err, SlugError::PathNotFound(_)));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn display_is_relative_and_slash_separated() {
        let (config, fs_ops, sink) = (Config::default(), SystemFileSystemOps::new(), MemorySink::new());
        let base = Path::new("/tmp/base");
        let ctx = Context::new(&config, &fs_ops, &sink, base);
        assert_eq!(ctx.display(base), ".");
        assert_eq!(ctx.display(&base.join("a").join("b.txt")), "a/b.txt");
        assert_eq!(ctx.display(Path::new("/elsewhere")), "/elsewhere");
    }

    #[test]
    fn end_to_end_scenario() {
        let dir = tree();
        let (config, fs_ops, sink) = (Config::default(), SystemFileSystemOps::new(), MemorySink::new());
        let stats = run(&config, &dir.path().join("My Folder"), &fs_ops, &sink).unwrap();

        assert!(stats.success());
        assert_eq!(stats.renamed, 2);
        assert_eq!(stats.ignored, 1);
        let renamed = dir.path().join("my-folder");
        assert!(renamed.join("draft-one.txt").is_file());
        assert!(renamed.join("README.md").is_file());
        assert!(!dir.path().join("My Folder").exists());
    }

    #[test]
    fn ignore_root_keeps_start_name() {
        let dir = tree();
        let start = dir.path().join("My Folder");
        let config = Config {
            ignore_root: true,
            ..Config::default()
        };
        let (fs_ops, sink) = (SystemFileSystemOps::new(), MemorySink::new());
        let stats = run(&config, &start, &fs_ops, &sink).unwrap();
        assert!(stats.success());
        assert!(start.join("draft-one.txt").is_file());
        assert_eq!(
            sink.messages(),
            vec![
                "renamed: Draft One.txt -> draft-one.txt",
                "ignored: README.md"
            ]
        );
    }

    #[test]
    fn ignore_root_keeps_start_file() {
        let dir = tree();
        let start = dir.path().join("My Folder").join("Draft One.txt");
        let config = Config {
            ignore_root: true,
            warn_limit: Some(5),
            ..Config::default()
        };
        let (fs_ops, sink) = (SystemFileSystemOps::new(), MemorySink::new());
        let stats = run(&config, &start, &fs_ops, &sink).unwrap();
        assert_eq!((stats.renamed, stats.unchanged, stats.warnings), (0, 1, 0));
        assert!(start.is_file());
        assert_eq!(sink.messages(), vec!["unchanged: Draft One.txt"]);
    }

    #[test]
    fn dry_run_leaves_tree_untouched() {
        let dir = tree();
        let config = Config {
            dry_run: true,
            ..Config::default()
        };
        let (fs_ops, sink) = (SystemFileSystemOps::new(), MemorySink::new());
        let stats = run(&config, &dir.path().join("My Folder"), &fs_ops, &sink).unwrap();

        assert_eq!(stats.renamed, 2);
        assert!(dir.path().join("My Folder").join("Draft One.txt").is_file());
        assert!(!dir.path().join("my-folder").exists());
        assert_eq!(
            sink.messages(),
            vec![
                "would rename: My Folder -> my-folder",
                "would rename: my-folder/Draft One.txt -> my-folder/draft-one.txt",
                "ignored: my-folder/README.md",
            ]
        );
    }

    #[test]
    fn second_pass_renames_nothing() {
        let dir = tree();
        fs::create_dir_all(dir.path().join("My Folder").join("Sub Dir")).unwrap();
        fs::write(
            dir.path().join("My Folder").join("Sub Dir").join("3 Notes.yml"),
            "",
        )
        .unwrap();
        let config = Config {
            digit_width: Some(2),
            ignore_root: true,
            ..Config::default()
        };
        let fs_ops = SystemFileSystemOps::new();

        let first = run(&config, dir.path(), &fs_ops, &MemorySink::new()).unwrap();
        assert!(first.success());
        assert_eq!(first.renamed, 4);
        assert!(
            dir.path()
                .join("my-folder/sub-dir/03-notes.yaml")
                .is_file()
        );

        let second = run(&config, dir.path(), &fs_ops, &MemorySink::new()).unwrap();
        assert!(second.success());
        assert_eq!(second.renamed, 0);
    }
}
