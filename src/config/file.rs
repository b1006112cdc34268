//! On-disk configuration file format.
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::toml_loader::load_config;
use crate::error::ConfigError;

/// Contents of a `--config` TOML file.
///
/// List keys extend the built-in sets; scalar keys override them.
///
/// ```toml
/// extensions = ["txt", "csv"]
/// underscore_extensions = ["pyi"]
/// ignore = ["**/node_modules"]
/// prefixes = ["~"]
/// max_length = 40
/// num_digits = 2
/// warn_limit = 200
/// error_limit = 255
///
/// [extension_map]
/// htm = "html"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Additional recognized extensions.
    pub extensions: Vec<String>,
    /// Additional extensions whose stems use `_`.
    pub underscore_extensions: Vec<String>,
    /// Additional extension renames.
    pub extension_map: BTreeMap<String, String>,
    /// Additional ignore globs.
    pub ignore: Vec<String>,
    /// Additional preserved prefixes.
    pub prefixes: Vec<String>,
    /// Additional preserved suffixes.
    pub suffixes: Vec<String>,
    /// Maximum stem length.
    pub max_length: Option<usize>,
    /// Width of a leading numeric token.
    pub num_digits: Option<usize>,
    /// Path length that triggers a warning.
    pub warn_limit: Option<usize>,
    /// Path length that fails the run.
    pub error_limit: Option<usize>,
}

impl ConfigFile {
    /// Read `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_config(path)
    }
}
