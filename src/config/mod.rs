//! Run configuration: built-in defaults, an optional TOML file and CLI
//! overrides, merged into one immutable [`Config`].
pub mod defaults;
pub mod file;
pub mod toml_loader;
pub mod validation;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::ConfigError;
use crate::slug::StemPolicy;
use file::ConfigFile;
use validation::{ValidationWarning, drop_empty};

/// Everything that controls a run.
///
/// Extension sets and the extension map hold bare extensions (`yml`, not
/// `.yml`); comparisons are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Extensions split off before normalizing a file stem.
    pub recognized_extensions: BTreeSet<String>,
    /// Extensions whose stems are joined with `_`.
    pub underscore_extensions: BTreeSet<String>,
    /// Extension renames.
    pub extension_map: BTreeMap<String, String>,
    /// Globs for paths that are left alone and not descended into.
    pub ignore_globs: Vec<String>,
    /// Preserved stem prefixes.
    pub prefixes: BTreeSet<String>,
    /// Preserved stem suffixes.
    pub suffixes: BTreeSet<String>,
    /// Maximum stem length, enforced on word boundaries.
    pub max_length: Option<usize>,
    /// Width a leading number is padded to.
    pub digit_width: Option<usize>,
    /// Path length above which a warning is reported.
    pub warn_limit: Option<usize>,
    /// Path length above which the run fails.
    pub error_limit: Option<usize>,
    /// Simulate renames without touching the filesystem.
    pub dry_run: bool,
    /// Never rename the start path itself.
    pub ignore_root: bool,
    /// Do not descend into the start directory.
    pub no_recurse: bool,
    /// The start path lies inside a git work tree.
    pub git_tracked: bool,
    /// Treat any rename as a failure for the exit status.
    pub fail_on_change: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recognized_extensions: defaults::RECOGNIZED_EXTENSIONS
                .iter()
                .chain(defaults::MIME_EXTENSIONS)
                .map(|s| (*s).to_string())
                .collect(),
            underscore_extensions: strings(defaults::UNDERSCORE_EXTENSIONS).collect(),
            extension_map: defaults::EXTENSION_MAP
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
            ignore_globs: strings(defaults::IGNORE_GLOBS).collect(),
            prefixes: strings(defaults::PREFIXES).collect(),
            suffixes: strings(defaults::SUFFIXES).collect(),
            max_length: None,
            digit_width: None,
            warn_limit: None,
            error_limit: None,
            dry_run: false,
            ignore_root: false,
            no_recurse: false,
            git_tracked: false,
            fail_on_change: false,
        }
    }
}

fn strings(items: &'static [&'static str]) -> impl Iterator<Item = String> {
    items.iter().map(|s| (*s).to_string())
}

/// Strip leading dots so `.yml` and `yml` mean the same thing.
fn bare_extension(ext: String) -> String {
    ext.trim_start_matches('.').to_string()
}

impl Config {
    /// Build a configuration from the defaults, an optional file and a layer
    /// of CLI values, in that order of precedence.
    ///
    /// Returns the configuration together with any validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if `file` cannot be read or parsed.
    pub fn load(
        file: Option<&Path>,
        cli: ConfigFile,
    ) -> Result<(Self, Vec<ValidationWarning>), ConfigError> {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        if let Some(path) = file {
            warnings.extend(config.extend_with(ConfigFile::load(path)?));
        }
        warnings.extend(config.extend_with(cli));
        warnings.extend(validation::validate(&config));
        Ok((config, warnings))
    }

    /// Merge `layer` into `self`: lists extend, scalars override.
    pub fn extend_with(&mut self, layer: ConfigFile) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let exts = |v: Vec<String>| v.into_iter().map(bare_extension).collect::<Vec<_>>();
        self.recognized_extensions.extend(drop_empty(
            "extensions",
            exts(layer.extensions),
            &mut warnings,
        ));
        self.underscore_extensions.extend(drop_empty(
            "underscore_extensions",
            exts(layer.underscore_extensions),
            &mut warnings,
        ));
        for (from, to) in layer.extension_map {
            let (from, to) = (bare_extension(from), bare_extension(to));
            if from.is_empty() || to.is_empty() {
                warnings.push(ValidationWarning::new(
                    "extension_map",
                    format!("{from:?} = {to:?}"),
                    "empty extension ignored",
                ));
                continue;
            }
            self.extension_map.insert(from, to);
        }
        self.ignore_globs
            .extend(drop_empty("ignore", layer.ignore, &mut warnings));
        self.prefixes
            .extend(drop_empty("prefixes", layer.prefixes, &mut warnings));
        self.suffixes
            .extend(drop_empty("suffixes", layer.suffixes, &mut warnings));

        self.max_length = layer.max_length.or(self.max_length);
        self.digit_width = layer.num_digits.or(self.digit_width);
        self.warn_limit = layer.warn_limit.or(self.warn_limit);
        self.error_limit = layer.error_limit.or(self.error_limit);

        warnings
    }

    /// Normalization policy for a stem, joined with `-` when `dash`.
    #[must_use]
    pub const fn stem_policy(&self, dash: bool) -> StemPolicy<'_> {
        StemPolicy {
            dash,
            prefixes: &self.prefixes,
            suffixes: &self.suffixes,
            max_length: self.max_length,
            digit_width: self.digit_width,
        }
    }

    /// Whether `ext` (bare) is split off file names.
    #[must_use]
    pub fn is_recognized(&self, ext: &str) -> bool {
        self.recognized_extensions.contains(ext)
    }

    /// Whether stems with extension `ext` (bare) are joined with `_`.
    #[must_use]
    pub fn uses_underscores(&self, ext: &str) -> bool {
        self.underscore_extensions.contains(ext)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_tables() {
        let config = Config::default();
        assert!(config.is_recognized("md"));
        assert!(config.is_recognized("R"));
        assert!(!config.is_recognized("r"));
        assert!(config.is_recognized("txt"), "mime extensions are recognized");
        assert!(config.uses_underscores("py"));
        assert_eq!(config.extension_map.get("yml").unwrap(), "yaml");
        assert!(config.prefixes.contains("_") && config.prefixes.contains("."));
        assert!(config.suffixes.contains("_"));
        assert_eq!(config.ignore_globs.len(), 6);
        assert!(!config.dry_run && !config.git_tracked);
    }

    #[test]
    fn lists_extend_and_scalars_override() {
        let mut config = Config {
            max_length: Some(10),
            ..Config::default()
        };
        let warnings = config.extend_with(ConfigFile {
            extensions: vec![".foo".into()],
            underscore_extensions: vec!["pyi".into()],
            ignore: vec!["**/target".into()],
            prefixes: vec!["~".into()],
            max_length: Some(30),
            num_digits: Some(3),
            ..ConfigFile::default()
        });
        assert!(warnings.is_empty());
        assert!(config.is_recognized("foo"), "leading dot is stripped");
        assert!(config.is_recognized("md"), "defaults are kept");
        assert!(config.uses_underscores("pyi"));
        assert!(config.ignore_globs.iter().any(|g| g == "**/target"));
        assert!(config.prefixes.contains("~"));
        assert_eq!(config.max_length, Some(30));
        assert_eq!(config.digit_width, Some(3));
    }

    #[test]
    fn unset_scalars_keep_previous_value() {
        let mut config = Config {
            warn_limit: Some(80),
            ..Config::default()
        };
        config.extend_with(ConfigFile::default());
        assert_eq!(config.warn_limit, Some(80));
    }

    #[test]
    fn empty_values_are_dropped_with_warnings() {
        let mut config = Config::default();
        let warnings = config.extend_with(ConfigFile {
            extensions: vec![".".into()],
            prefixes: vec![String::new()],
            extension_map: BTreeMap::from([("txt".into(), String::new())]),
            ..ConfigFile::default()
        });
        assert_eq!(warnings.len(), 3);
        assert!(!config.prefixes.contains(""));
        assert!(!config.extension_map.contains_key("txt"));
    }

    #[test]
    fn load_applies_file_then_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathslug.toml");
        std::fs::write(&path, "max_length = 20\nwarn_limit = 50\n").unwrap();
        let cli = ConfigFile {
            max_length: Some(12),
            ..ConfigFile::default()
        };
        let (config, warnings) = Config::load(Some(&path), cli).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.max_length, Some(12));
        assert_eq!(config.warn_limit, Some(50));
    }

    #[test]
    fn load_reports_validation_warnings() {
        let cli = ConfigFile {
            warn_limit: Some(300),
            error_limit: Some(200),
            ..ConfigFile::default()
        };
        let (_config, warnings) = Config::load(None, cli).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source, "limits");
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml")), ConfigFile::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn stem_policy_carries_settings() {
        let config = Config {
            max_length: Some(8),
            digit_width: Some(2),
            ..Config::default()
        };
        let policy = config.stem_policy(false);
        assert!(!policy.dash);
        assert_eq!(policy.separator(), '_');
        assert_eq!(policy.max_length, Some(8));
        assert_eq!(policy.digit_width, Some(2));
    }
}
