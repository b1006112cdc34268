//! Command-line interface definition.
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use crate::config::file::ConfigFile;

/// Automatically rename files and directories to be URL-friendly.
#[derive(Parser, Debug)]
#[command(name = "pathslug", version = option_env!("PATHSLUG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")))]
pub struct Cli {
    /// Path to the file or directory to process (current directory if omitted)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Do not actually rename files or directories
    #[arg(short = 'n', short_alias = 'd', long)]
    pub dry_run: bool,

    /// Disable protections and force processing
    #[arg(short, long)]
    pub force: bool,

    /// Report unchanged and ignored paths too (overrides --quiet)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Console logging level (overrides --quiet and --verbose)
    #[arg(long, value_enum, value_name = "LEVEL", ignore_case = true)]
    pub log_level: Option<LogLevel>,

    /// Also log every message, regardless of level, to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Read additional settings from a TOML file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only process children of the path (implied for the current directory)
    #[arg(long)]
    pub ignore_root: bool,

    /// Do not recurse into the path's children
    #[arg(long)]
    pub no_recurse: bool,

    /// Exit with failure if anything was (or would be) renamed
    #[arg(long)]
    pub fail_on_change: bool,

    /// Additional glob patterns to ignore
    #[arg(long, value_name = "GLOB", value_delimiter = ',')]
    pub ignore_globs: Vec<String>,

    /// Additional file extensions to recognize (without periods)
    #[arg(long, value_name = "EXT", value_delimiter = ',')]
    pub ok_exts: Vec<String>,

    /// Additional extensions whose names use underscores instead of dashes
    #[arg(long, value_name = "EXT", value_delimiter = ',')]
    pub no_dash_exts: Vec<String>,

    /// Additional name prefixes to leave unchanged
    #[arg(long, value_name = "PREFIX", value_delimiter = ',')]
    pub prefixes: Vec<String>,

    /// Additional name suffixes (before the extension) to leave unchanged
    #[arg(long, value_name = "SUFFIX", value_delimiter = ',')]
    pub suffixes: Vec<String>,

    /// Shorten names to at most this many characters (excluding extension)
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Pad or clamp leading numbers to this many digits
    #[arg(long, value_name = "N")]
    pub num_digits: Option<usize>,

    /// Warn about paths longer than this many characters
    #[arg(long, value_name = "N")]
    pub warn_limit: Option<usize>,

    /// Fail on paths longer than this many characters (all paths are still processed)
    #[arg(long, value_name = "N")]
    pub error_limit: Option<usize>,
}

/// Console logging levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Everything, including unchanged and ignored paths.
    Debug,
    /// Renames and anything more severe.
    Info,
    /// Warnings and errors.
    Warning,
    /// Errors only.
    Error,
    /// Errors only.
    Critical,
}

impl Cli {
    /// Console level after resolving `--log-level`, `--verbose` and `--quiet`.
    #[must_use]
    pub const fn console_level(&self) -> LevelFilter {
        match self.log_level {
            Some(LogLevel::Debug) => LevelFilter::DEBUG,
            Some(LogLevel::Info) => LevelFilter::INFO,
            Some(LogLevel::Warning) => LevelFilter::WARN,
            Some(LogLevel::Error | LogLevel::Critical) => LevelFilter::ERROR,
            None if self.verbose => LevelFilter::DEBUG,
            None if self.quiet => LevelFilter::ERROR,
            None => LevelFilter::INFO,
        }
    }

    /// The configuration values given on the command line, in the same shape
    /// as a config file so they can be layered over one.
    #[must_use]
    pub fn config_layer(&self) -> ConfigFile {
        ConfigFile {
            extensions: self.ok_exts.clone(),
            underscore_extensions: self.no_dash_exts.clone(),
            extension_map: std::collections::BTreeMap::new(),
            ignore: self.ignore_globs.clone(),
            prefixes: self.prefixes.clone(),
            suffixes: self.suffixes.clone(),
            max_length: self.max_length,
            num_digits: self.num_digits,
            warn_limit: self.warn_limit,
            error_limit: self.error_limit,
        }
    }
}
