// Shared helpers for integration tests.
//
// Provides a temporary directory tree with a fluent builder, a listing of
// its contents, and a one-call wrapper around the engine that captures the
// emitted events.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pathslug::config::Config;
use pathslug::engine::{self, Stats};
use pathslug::logging::MemorySink;
use pathslug::operations::SystemFileSystemOps;

/// An isolated tree backed by a [`tempfile::TempDir`], deleted on drop.
pub struct TestTree {
    /// Temporary directory holding the tree.
    pub root: tempfile::TempDir,
}

impl TestTree {
    /// Path of the tree root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `rel` inside the tree.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Every entry below the root as a sorted list of `/`-separated relative
    /// paths, directories suffixed with `/`.
    pub fn listing(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect(self.root.path(), self.root.path(), &mut out);
        out.sort();
        out
    }

    /// Run the engine on `rel` (or the root when `rel` is empty) and return
    /// the stats and rendered events.
    pub fn run(&self, rel: &str, config: &Config) -> (Stats, Vec<String>) {
        let start = if rel.is_empty() {
            self.path().to_path_buf()
        } else {
            self.join(rel)
        };
        let sink = MemorySink::new();
        let stats = engine::run(config, &start, &SystemFileSystemOps::new(), &sink)
            .expect("start path exists");
        (stats, sink.messages())
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in std::fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        let rel = path
            .strip_prefix(root)
            .expect("inside root")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        if path.is_dir() && !path.is_symlink() {
            out.push(format!("{rel}/"));
            collect(root, &path, out);
        } else {
            out.push(rel);
        }
    }
}

/// Fluent builder for [`TestTree`].
pub struct TreeBuilder {
    tree: TestTree,
}

impl TreeBuilder {
    /// Begin building an empty tree.
    pub fn new() -> Self {
        Self {
            tree: TestTree {
                root: tempfile::tempdir().expect("create temp dir"),
            },
        }
    }

    /// Create directory `rel` and any missing parents.
    pub fn dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.tree.join(rel)).expect("create dir");
        self
    }

    /// Create file `rel` containing `content`, creating parents as needed.
    pub fn file_with(self, rel: &str, content: &str) -> Self {
        let path = self.tree.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Create an empty file `rel`.
    pub fn file(self, rel: &str) -> Self {
        self.file_with(rel, "")
    }

    /// Finish building.
    pub fn build(self) -> TestTree {
        self.tree
    }
}

/// Default configuration walking below the start path only.
pub fn children_only() -> Config {
    Config {
        ignore_root: true,
        ..Config::default()
    }
}
