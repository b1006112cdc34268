//! The single place where the filesystem is mutated.
use std::path::Path;

use super::Context;
use super::outcome::{Outcome, Stats};

/// Result of applying one proposed rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReport {
    /// Outcome of the rename itself.
    pub rename: Outcome,
    /// Length-limit overlay for the new path, if a limit was exceeded.
    pub length: Option<Outcome>,
}

impl ChangeReport {
    /// Whether the entry now lives at the new path.
    #[must_use]
    pub const fn renamed(&self) -> bool {
        matches!(self.rename, Outcome::Renamed { .. })
    }

    /// Whether either part of the report is fatal.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.rename.is_fatal() || self.length.as_ref().is_some_and(Outcome::is_fatal)
    }

    /// Counters for this report.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::of(&self.rename);
        if let Some(length) = &self.length {
            stats.record(length);
        }
        stats
    }
}

/// Rename `old` to `new` unless that would clobber another entry, then check
/// the new path against the length limits. Both outcomes are reported to the
/// context's sink.
pub fn apply(ctx: &Context<'_>, old: &Path, new: &Path) -> ChangeReport {
    let old_display = ctx.display(old);
    let new_display = ctx.display(new);

    let rename = if old == new {
        Outcome::Unchanged
    } else if has_conflict(ctx, old, new) {
        Outcome::ConflictBlocked {
            to: new_display.clone(),
        }
    } else {
        match ctx.fs.rename(old, new) {
            Ok(()) => Outcome::Renamed {
                to: new_display.clone(),
                simulated: ctx.config.dry_run,
            },
            Err(e) => Outcome::AccessDenied {
                reason: e.to_string(),
            },
        }
    };
    ctx.emit(&old_display, rename.clone());

    let length = check_length(ctx, &new_display);
    if let Some(outcome) = &length {
        ctx.emit(&new_display, outcome.clone());
    }

    ChangeReport { rename, length }
}

/// An entry at `new` blocks the rename unless it is `old` itself seen
/// through a case-insensitive filesystem.
fn has_conflict(ctx: &Context<'_>, old: &Path, new: &Path) -> bool {
    if !ctx.fs.exists(new) {
        return false;
    }
    let case_variant = old.to_string_lossy().to_lowercase() == new.to_string_lossy().to_lowercase();
    !(case_variant && ctx.fs.same_entry(old, new))
}

fn check_length(ctx: &Context<'_>, display: &str) -> Option<Outcome> {
    let length = display.chars().count();
    if let Some(limit) = ctx.config.error_limit
        && length > limit
    {
        return Some(Outcome::LengthError { limit, length });
    }
    if let Some(limit) = ctx.config.warn_limit
        && length > limit
    {
        return Some(Outcome::LengthWarning { limit, length });
    }
    None
}
