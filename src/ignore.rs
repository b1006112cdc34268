//! Glob-based path exclusion.
use glob_match::glob_match;

/// Matches walk-relative paths against the configured ignore globs.
///
/// Paths are compared in `/`-separated form relative to the walk base. A
/// pattern beginning with `**/` also matches an entry directly under the
/// base, so `**/.git` ignores `.git` as well as `sub/.git`.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    globs: Vec<String>,
}

impl IgnoreMatcher {
    /// Build a matcher from glob patterns. Empty patterns are dropped.
    #[must_use]
    pub fn new<I, S>(globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            globs: globs
                .into_iter()
                .map(Into::into)
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if `rel_path` matches any glob.
    ///
    /// The empty path (the walk base itself) never matches.
    #[must_use]
    pub fn matches_any(&self, rel_path: &str) -> bool {
        if rel_path.is_empty() {
            return false;
        }
        self.globs.iter().any(|glob| {
            glob_match(glob, rel_path)
                || glob
                    .strip_prefix("**/")
                    .is_some_and(|rest| glob_match(rest, rel_path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> IgnoreMatcher {
        IgnoreMatcher::new([
            "**/__pycache__",
            "**/.DS_Store",
            "**/.git",
            "**/LICENSE*",
            "**/README*",
        ])
    }

    #[test]
    fn matches_top_level_entries() {
        let m = defaults();
        assert!(m.matches_any(".git"));
        assert!(m.matches_any("README.md"));
        assert!(m.matches_any("LICENSE"));
    }

    #[test]
    fn matches_nested_entries() {
        let m = defaults();
        assert!(m.matches_any("My Folder/README.md"));
        assert!(m.matches_any("a/b/__pycache__"));
    }

    #[test]
    fn does_not_match_unrelated_paths() {
        let m = defaults();
        assert!(!m.matches_any("My Folder/Draft One.txt"));
        assert!(!m.matches_any("gitignore"));
        assert!(!m.matches_any("docs/READ.md"));
    }

    #[test]
    fn nested_pattern_does_not_match_contents_by_itself() {
        // contents of an ignored directory are never visited, so the
        // matcher only needs to match the directory entry
        let m = defaults();
        assert!(!m.matches_any(".git/HEAD"));
    }

    #[test]
    fn empty_path_never_matches() {
        let m = IgnoreMatcher::new(["**"]);
        assert!(!m.matches_any(""));
        assert!(m.matches_any("anything"));
    }

    #[test]
    fn empty_patterns_are_dropped() {
        let m = IgnoreMatcher::new([""]);
        assert!(!m.matches_any("x"));
    }
}
