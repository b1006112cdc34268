//! Depth-first tree walk: rename an entry, then descend into its new path.
use std::path::{Path, PathBuf};

use super::Context;
use super::apply::apply;
use super::outcome::{Outcome, Stats};
use crate::extension::{map_extension, split_name};
use crate::slug::normalize;

/// Process `path` and, for directories, everything below it.
///
/// `path` is owned because a directory rename changes where its children
/// live; each frame hands the already-updated path to its children.
pub fn process_path(ctx: &Context<'_>, path: PathBuf, ignore_root: bool, no_recurse: bool) -> Stats {
    let display = ctx.display(&path);
    if path != ctx.base && ctx.ignore.matches_any(&display) {
        return ctx.emit(&display, Outcome::Ignored);
    }

    if ctx.fs.is_dir(&path) {
        process_dir(ctx, path, ignore_root, no_recurse)
    } else if ctx.fs.is_file(&path) {
        process_file(ctx, &path, ignore_root)
    } else {
        ctx.emit(
            &display,
            Outcome::Skipped {
                reason: "not a file or directory".to_string(),
            },
        )
    }
}

fn process_dir(ctx: &Context<'_>, mut path: PathBuf, ignore_root: bool, no_recurse: bool) -> Stats {
    let mut stats = Stats::default();

    if !ignore_root {
        match new_dir_path(ctx, &path) {
            Ok(new) => {
                let report = apply(ctx, &path, &new);
                stats += report.stats();
                if report.renamed() {
                    path = new;
                }
            }
            Err(skip) => stats += skip,
        }
    }

    let display = ctx.display(&path);
    if no_recurse {
        return stats + ctx.emit(&display, Outcome::Ignored);
    }
    if ctx.fs.is_symlink(&path) {
        return stats
            + ctx.emit(
                &display,
                Outcome::Skipped {
                    reason: "symlinked directory not descended".to_string(),
                },
            );
    }

    let mut children = match ctx.fs.read_dir(&path) {
        Ok(children) => children,
        Err(e) => {
            return stats
                + ctx.emit(
                    &display,
                    Outcome::AccessDenied {
                        reason: format!("{e:#}"),
                    },
                );
        }
    };
    children.sort();
    for child in children {
        stats += process_path(ctx, child, false, false);
    }
    stats
}

/// Upper bound on re-slugging a file name that has not yet settled.
const MAX_SETTLE_PASSES: usize = 4;

fn process_file(ctx: &Context<'_>, path: &Path, ignore_root: bool) -> Stats {
    if ignore_root {
        return ctx.emit(&ctx.display(path), Outcome::Unchanged);
    }
    let Some(name) = utf8_name(path) else {
        return skip_non_utf8(ctx, path);
    };
    let Some(mut new_name) = slug_file_name(ctx, name) else {
        return skip_empty(ctx, path);
    };
    // Lowercasing can expose a recognized extension (`Notes.YML` → `notes.yml`)
    // that the next pass would split off and map.
    for _ in 0..MAX_SETTLE_PASSES {
        match slug_file_name(ctx, &new_name) {
            Some(next) if next != new_name => new_name = next,
            _ => break,
        }
    }
    apply(ctx, path, &path.with_file_name(new_name)).stats()
}

/// One normalization pass over a file name, or `None` when the stem has no
/// slug form.
fn slug_file_name(ctx: &Context<'_>, name: &str) -> Option<String> {
    let (stem, ext) = match split_name(name) {
        (stem, Some(ext)) if ctx.config.is_recognized(bare(ext)) => (stem, ext),
        _ => (name, ""),
    };
    let dash = !ctx.config.uses_underscores(bare(ext));

    let slug = normalize(stem, &ctx.config.stem_policy(dash));
    if slug.is_empty() {
        return None;
    }
    Some(format!("{slug}{}", map_extension(ext, &ctx.config.extension_map)))
}

/// Compute the renamed path of a directory, or the stats of the skip event
/// reported when no usable name exists.
fn new_dir_path(ctx: &Context<'_>, path: &Path) -> Result<PathBuf, Stats> {
    let Some(name) = utf8_name(path) else {
        return Err(skip_non_utf8(ctx, path));
    };
    let slug = normalize(name, &ctx.config.stem_policy(true));
    if slug.is_empty() {
        return Err(skip_empty(ctx, path));
    }
    Ok(path.with_file_name(slug))
}

fn bare(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

fn utf8_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn skip_non_utf8(ctx: &Context<'_>, path: &Path) -> Stats {
    ctx.emit(
        &ctx.display(path),
        Outcome::Skipped {
            reason: "name is not valid UTF-8".to_string(),
        },
    )
}

fn skip_empty(ctx: &Context<'_>, path: &Path) -> Stats {
    ctx.emit(
        &ctx.display(path),
        Outcome::Skipped {
            reason: "name has no slug form".to_string(),
        },
    )
}
