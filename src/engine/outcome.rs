//! Per-path outcomes, the events that carry them, and run statistics.
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::logging::Severity;

/// What happened to one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The computed name equals the current name.
    Unchanged,
    /// The entry was renamed (or, under dry run, would have been).
    Renamed {
        /// New path relative to the walk base.
        to: String,
        /// `true` when the rename was only recorded by the dry-run overlay.
        simulated: bool,
    },
    /// A different entry already exists at the target name.
    ConflictBlocked {
        /// Target path relative to the walk base.
        to: String,
    },
    /// The rename or directory listing failed.
    AccessDenied {
        /// OS error text.
        reason: String,
    },
    /// The new path is longer than the warning limit.
    LengthWarning {
        /// Configured limit.
        limit: usize,
        /// Path length in characters.
        length: usize,
    },
    /// The new path is longer than the error limit.
    LengthError {
        /// Configured limit.
        limit: usize,
        /// Path length in characters.
        length: usize,
    },
    /// The path matched an ignore glob, or recursion was disabled.
    Ignored,
    /// The path was left alone for a reason that is not a failure.
    Skipped {
        /// Short human-readable reason.
        reason: String,
    },
}

impl Outcome {
    /// Console severity used when the outcome is reported.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Unchanged | Self::Ignored | Self::Skipped { .. } => Severity::Debug,
            Self::Renamed { .. } => Severity::Info,
            Self::LengthWarning { .. } => Severity::Warn,
            Self::ConflictBlocked { .. } | Self::AccessDenied { .. } | Self::LengthError { .. } => {
                Severity::Error
            }
        }
    }

    /// Whether the outcome makes the whole run unsuccessful.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConflictBlocked { .. } | Self::AccessDenied { .. } | Self::LengthError { .. }
        )
    }
}

/// An outcome attached to the path it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Path relative to the walk base, `/`-separated; `.` for the base itself.
    pub path: String,
    /// What happened.
    pub outcome: Outcome,
}

impl Event {
    /// Pair `outcome` with `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = &self.path;
        match &self.outcome {
            Outcome::Unchanged => write!(f, "unchanged: {path}"),
            Outcome::Renamed {
                to,
                simulated: false,
            } => write!(f, "renamed: {path} -> {to}"),
            Outcome::Renamed {
                to,
                simulated: true,
            } => write!(f, "would rename: {path} -> {to}"),
            Outcome::ConflictBlocked { to } => {
                write!(f, "conflict preventing renaming: {path} -> {to}")
            }
            Outcome::AccessDenied { reason } => write!(f, "access denied: {path} ({reason})"),
            Outcome::LengthWarning { limit, length } | Outcome::LengthError { limit, length } => {
                write!(f, "path exceeds {limit} characters ({length}): {path}")
            }
            Outcome::Ignored => write!(f, "ignored: {path}"),
            Outcome::Skipped { reason } => write!(f, "skipped ({reason}): {path}"),
        }
    }
}

/// Counters for one run, merged with `+=` as recursion unwinds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Paths renamed (or that would be renamed under dry run).
    pub renamed: u32,
    /// Paths whose name was already normalized.
    pub unchanged: u32,
    /// Paths not visited because of an ignore rule.
    pub ignored: u32,
    /// Paths that were neither file nor directory, or had no usable name.
    pub skipped: u32,
    /// Length warnings.
    pub warnings: u32,
    /// Fatal outcomes.
    pub failures: u32,
}

impl Stats {
    /// Count `outcome`.
    pub const fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Renamed { .. } => self.renamed += 1,
            Outcome::Ignored => self.ignored += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::LengthWarning { .. } => self.warnings += 1,
            Outcome::ConflictBlocked { .. }
            | Outcome::AccessDenied { .. }
            | Outcome::LengthError { .. } => self.failures += 1,
        }
    }

    /// Stats holding a single outcome.
    #[must_use]
    pub fn of(outcome: &Outcome) -> Self {
        let mut stats = Self::default();
        stats.record(outcome);
        stats
    }

    /// `true` when no fatal outcome occurred.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.failures == 0
    }

    /// One-line summary for the end of a run.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let renamed = if dry_run {
            format!("{} would be renamed", self.renamed)
        } else {
            format!("{} renamed", self.renamed)
        };
        format!(
            "{renamed}, {} unchanged, {} ignored, {} skipped, {} warnings, {} failed",
            self.unchanged, self.ignored, self.skipped, self.warnings, self.failures
        )
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Self) {
        self.renamed += rhs.renamed;
        self.unchanged += rhs.unchanged;
        self.ignored += rhs.ignored;
        self.skipped += rhs.skipped;
        self.warnings += rhs.warnings;
        self.failures += rhs.failures;
    }
}

impl Add for Stats {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}
