//! Structured logger with dry-run awareness and the end-of-run summary.
use std::path::PathBuf;

use super::subscriber::{CRITICAL_TARGET, DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{EventSink, Severity};
use crate::engine::{Event, Outcome, Stats};

/// Console and file logger backed by `tracing`.
///
/// Formatting and routing are done by the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber); this type only
/// decides which level and target each message is emitted at.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// `log_file` is only remembered for display in the summary; the file
    /// itself is written by the subscriber's file layer.
    #[must_use]
    pub const fn new(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    /// Log an error that stops the run before any path is processed.
    pub fn critical(&self, msg: &str) {
        tracing::error!(target: CRITICAL_TARGET, "{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Print the summary line for a finished run.
    pub fn print_summary(&self, stats: &Stats, dry_run: bool) {
        self.stage("Summary");
        let color = if !stats.success() {
            "\x1b[31m"
        } else if stats.warnings > 0 {
            "\x1b[33m"
        } else {
            "\x1b[32m"
        };
        self.info(&format!("{color}{}\x1b[0m", stats.summary(dry_run)));
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl EventSink for Logger {
    fn record(&self, event: &Event) {
        let msg = event.to_string();
        match (event.outcome.severity(), &event.outcome) {
            (_, Outcome::Renamed { simulated: true, .. }) => self.dry_run(&msg),
            (Severity::Debug, _) => self.debug(&msg),
            (Severity::Info, _) => self.info(&msg),
            (Severity::Warn, _) => self.warn(&msg),
            (Severity::Error, _) => self.error(&msg),
        }
    }
}
