//! Non-fatal checks on the merged configuration.
use super::Config;

/// A validation warning detected while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Where the value came from (e.g. "prefixes", "limits").
    pub source: String,
    /// The specific value that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning about `item` from `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.source, self.item, self.message)
    }
}

/// Drop empty strings from `values`, reporting each one.
pub(super) fn drop_empty(
    source: &str,
    values: Vec<String>,
    warnings: &mut Vec<ValidationWarning>,
) -> Vec<String> {
    values
        .into_iter()
        .filter(|v| {
            let empty = v.is_empty();
            if empty {
                warnings.push(ValidationWarning::new(
                    source,
                    format!("{v:?}"),
                    "empty value ignored",
                ));
            }
            !empty
        })
        .collect()
}

/// Check a fully assembled configuration for suspicious settings.
#[must_use]
pub fn validate(config: &Config) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if let (Some(warn), Some(error)) = (config.warn_limit, config.error_limit)
        && warn >= error
    {
        warnings.push(ValidationWarning::new(
            "limits",
            format!("warn_limit={warn}"),
            format!("not below error_limit={error}, so length warnings never fire"),
        ));
    }
    if config.max_length == Some(0) {
        warnings.push(ValidationWarning::new(
            "max_length",
            "0",
            "every stem is cut to its first word",
        ));
    }
    if config.digit_width == Some(0) {
        warnings.push(ValidationWarning::new(
            "num_digits",
            "0",
            "every leading number becomes 0",
        ));
    }

    warnings
}
