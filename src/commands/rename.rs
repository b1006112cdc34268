//! Command: normalize every name under a path.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::Config;
use crate::engine::{self, Stats};
use crate::error::SlugError;
use crate::exec::{Executor, SystemExecutor};
use crate::git::RepoStatus;
use crate::logging::{Logger, init_subscriber};
use crate::operations::SystemFileSystemOps;

/// Run the rename command.
///
/// # Errors
///
/// Returns an error if the path does not exist, the git safety check fails
/// without `--force`, the config file is unusable, any path failed, or
/// `--fail-on-change` is set and something was renamed.
pub fn run(cli: &Cli) -> Result<()> {
    init_subscriber(cli.console_level(), cli.log_file.as_deref());
    let log = Logger::new(cli.log_file.clone());
    let stats = execute(cli, &log, Arc::new(SystemExecutor))?;
    check_exit(cli, &stats)
}

/// Everything [`run`] does after logging is initialised, returning the run
/// statistics instead of an exit decision.
///
/// # Errors
///
/// Returns an error if the run cannot start: missing path, failed git
/// check, or unusable config file.
pub fn execute(cli: &Cli, log: &Logger, executor: Arc<dyn Executor>) -> Result<Stats> {
    let path = match dunce::canonicalize(&cli.path) {
        Ok(path) => path,
        Err(_) => {
            let err = SlugError::PathNotFound(cli.path.clone());
            log.critical(&err.to_string());
            return Err(err.into());
        }
    };

    let status = RepoStatus::detect(executor.as_ref(), &path);
    log.debug(&format!("repository status: {status:?}"));
    if let Err(err) = status.require_tracked(cli.force, &path) {
        log.critical(&err.to_string());
        log.warn("actions might be destructive and irreversible");
        log.info("run again with --force to override and process anyway");
        return Err(err.into());
    }
    if cli.force {
        log.warn("disabling protections and forcing processing");
    }

    let (mut config, warnings) = Config::load(cli.config.as_deref(), cli.config_layer())
        .map_err(SlugError::from)
        .context("loading configuration")?;
    for warning in &warnings {
        log.warn(&format!("config: {warning}"));
    }
    config.dry_run = cli.dry_run;
    config.ignore_root = cli.ignore_root || is_current_dir(&path);
    config.no_recurse = cli.no_recurse;
    config.git_tracked = status.is_tracked();
    config.fail_on_change = cli.fail_on_change;

    if config.dry_run {
        log.dry_run("beginning dry run (no changes will be made)");
    }

    let fs = if config.git_tracked {
        SystemFileSystemOps::with_git(executor)
    } else {
        SystemFileSystemOps::new()
    };

    log.stage(&format!("Processing {}", path.display()));
    let stats = engine::run(&config, &path, &fs, log)?;
    log.print_summary(&stats, config.dry_run);
    Ok(stats)
}

/// Map finished-run statistics to the process outcome.
///
/// # Errors
///
/// Returns an error if any path failed, or if `--fail-on-change` is set and
/// anything was renamed.
pub fn check_exit(cli: &Cli, stats: &Stats) -> Result<()> {
    if !stats.success() {
        bail!("{} path(s) could not be processed", stats.failures);
    }
    if cli.fail_on_change && stats.renamed > 0 {
        if cli.dry_run {
            bail!("{} path(s) would be renamed", stats.renamed);
        }
        bail!("{} path(s) were renamed", stats.renamed);
    }
    Ok(())
}

fn is_current_dir(path: &Path) -> bool {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| dunce::canonicalize(cwd).ok())
        .is_some_and(|cwd: PathBuf| cwd == path)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::MockExecutor;
    use clap::Parser;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pathslug").chain(args.iter().copied()))
    }

    fn not_a_repo() -> Arc<MockExecutor> {
        Arc::new(MockExecutor::with_responses(vec![(false, String::new())]))
    }

    #[test]
    fn missing_path_fails_before_git_check() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let executor = not_a_repo();
        let err = execute(
            &cli(&[missing.to_str().unwrap()]),
            &Logger::default(),
            executor.clone(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn untracked_path_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Some File.md"), "").unwrap();
        let err = execute(
            &cli(&[dir.path().to_str().unwrap(), "--ignore-root"]),
            &Logger::default(),
            not_a_repo(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SlugError>(),
            Some(SlugError::NotVersionControlled(_))
        ));
        assert!(dir.path().join("Some File.md").exists(), "nothing renamed");
    }

    #[test]
    fn refusal_explains_how_to_override() {
        let dir = tempfile::tempdir().unwrap();
        let (log, log_path, _tmp, _guard) = crate::logging::isolated_logger();
        execute(&cli(&[dir.path().to_str().unwrap()]), &log, not_a_repo()).unwrap_err();

        let contents = fs::read_to_string(log_path).unwrap();
        assert!(contents.contains("[critical] specified path is not within a git repository"));
        assert!(contents.contains("[warn] actions might be destructive and irreversible"));
        assert!(contents.contains("]     run again with --force to override and process anyway"));
    }

    #[test]
    fn missing_git_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(MockExecutor::with_responses(vec![]).with_which(false));
        let err = execute(
            &cli(&[dir.path().to_str().unwrap()]),
            &Logger::default(),
            executor,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SlugError>(),
            Some(SlugError::GitUnavailable(_))
        ));
    }

    #[test]
    fn force_processes_untracked_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Some File.md"), "").unwrap();
        let stats = execute(
            &cli(&[dir.path().to_str().unwrap(), "--ignore-root", "-f"]),
            &Logger::default(),
            not_a_repo(),
        )
        .unwrap();
        assert_eq!(stats.renamed, 1);
        assert!(dir.path().join("some-file.md").exists());
    }

    #[test]
    fn tracked_tree_renames_through_git() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Some File.md"), "").unwrap();
        // rev-parse succeeds, then git mv fails so the plain rename is used
        let executor = Arc::new(MockExecutor::with_responses(vec![
            (true, String::new()),
            (false, String::new()),
        ]));
        let stats = execute(
            &cli(&[dir.path().to_str().unwrap(), "--ignore-root"]),
            &Logger::default(),
            executor.clone(),
        )
        .unwrap();
        assert_eq!(stats.renamed, 1);
        let calls = executor.calls();
        assert_eq!(calls[0], "git rev-parse");
        assert!(calls[1].starts_with("git mv -- "));
        assert!(dir.path().join("some-file.md").exists());
    }

    #[test]
    fn bad_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("pathslug.toml");
        fs::write(&config, "nonsense = true\n").unwrap();
        let err = execute(
            &cli(&[
                dir.path().to_str().unwrap(),
                "-f",
                "--config",
                config.to_str().unwrap(),
            ]),
            &Logger::default(),
            not_a_repo(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("loading configuration"));
    }

    #[test]
    fn exit_reflects_failures_and_fail_on_change() {
        let ok = Stats {
            renamed: 2,
            ..Stats::default()
        };
        assert!(check_exit(&cli(&[]), &ok).is_ok());
        assert!(check_exit(&cli(&["--fail-on-change"]), &ok).is_err());
        let err = check_exit(&cli(&["--fail-on-change", "-n"]), &ok).unwrap_err();
        assert_eq!(err.to_string(), "2 path(s) would be renamed");

        let failed = Stats {
            failures: 1,
            ..Stats::default()
        };
        assert!(check_exit(&cli(&[]), &failed).is_err());
        assert!(check_exit(&cli(&[]), &Stats::default()).is_ok());
    }
}
