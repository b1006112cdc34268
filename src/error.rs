//! Domain-specific error types for the rename engine.
//!
//! Per-path results (conflicts, denied renames, length violations) are not
//! errors: they are recorded as [`Outcome`](crate::engine::Outcome)s and the
//! walk carries on. The types here cover the few conditions that stop a run
//! before any path is touched. Command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SlugError
//! ├── PathNotFound           : start path does not exist
//! ├── NotVersionControlled   : git check failed and --force was not given
//! ├── GitUnavailable         : git could not be run and --force was not given
//! └── Config(ConfigError)    : config file I/O or TOML syntax
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the rename engine.
#[derive(Error, Debug)]
pub enum SlugError {
    /// The path given on the command line does not exist.
    #[error("specified path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The path is not inside a git work tree and protections are enabled.
    #[error("specified path is not within a git repository: {}", .0.display())]
    NotVersionControlled(PathBuf),

    /// Whether the path is tracked could not be determined.
    #[error("unable to determine whether path is within git repository: {}", .0.display())]
    GitUnavailable(PathBuf),

    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that arise while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected keys.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: String,
        /// Parser message.
        message: String,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn path_not_found_display() {
        let e = SlugError::PathNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(e.to_string(), "specified path does not exist: /no/such/dir");
    }

    #[test]
    fn not_version_controlled_display() {
        let e = SlugError::NotVersionControlled(PathBuf::from("/tmp/x"));
        assert_eq!(
            e.to_string(),
            "specified path is not within a git repository: /tmp/x"
        );
    }

    #[test]
    fn git_unavailable_display() {
        let e = SlugError::GitUnavailable(PathBuf::from("/tmp/x"));
        assert!(e.to_string().contains("unable to determine"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: "pathslug.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("pathslug.toml"));
    }

    #[test]
    fn config_error_invalid_syntax_display() {
        let e = ConfigError::InvalidSyntax {
            path: "pathslug.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid TOML in pathslug.toml: expected `=`"
        );
    }

    #[test]
    fn slug_error_from_config_error() {
        let e: SlugError = ConfigError::InvalidSyntax {
            path: "a.toml".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert!(e.to_string().contains("Configuration error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<SlugError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn slug_error_converts_to_anyhow() {
        let e = SlugError::PathNotFound(PathBuf::from("x"));
        let _anyhow_err: anyhow::Error = e.into();
    }
}
