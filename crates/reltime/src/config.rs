#![forbid(unsafe_code)]

//! Configuration-as-data for the process-wide formatting state.
//!
//! ```toml
//! # reltime.toml
//! default_locale = "en-US"
//!
//! [thresholds]
//! second = 45
//! minute = 45
//! hour = 22
//! day = 26
//! month = 11
//! ```
//!
//! ```rust,ignore
//! let config = RelativeTimeConfig::from_toml_file("reltime.toml")?;
//! config.apply(&RelativeTimeContext::global())?;
//! ```
//!
//! Every field defaults to the built-in value, so a partial file only
//! overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::{DEFAULT_LOCALE, RelativeTimeContext};
use crate::locale::LocaleKey;
use crate::thresholds::ThresholdTable;
use crate::unit::Unit;

/// Errors from loading or applying a [`RelativeTimeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "toml-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Tunable process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelativeTimeConfig {
    /// Tag tried when a formatter is built without requested locales.
    pub default_locale: String,
    pub thresholds: ThresholdTable,
}

impl Default for RelativeTimeConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            thresholds: ThresholdTable::default(),
        }
    }
}

impl RelativeTimeConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check every value. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if LocaleKey::parse(&self.default_locale).is_err() {
            errors.push(format!(
                "default_locale \"{}\" is not a structurally valid language tag",
                self.default_locale
            ));
        }
        for unit in Unit::PRIORITY {
            if self.thresholds.get(unit) == Some(0) {
                errors.push(format!("thresholds.{unit} must be > 0"));
            }
        }
        errors
    }

    /// Validate, then publish into `context`.
    pub fn apply(&self, context: &RelativeTimeContext) -> Result<(), ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        context
            .set_thresholds(self.thresholds)
            .map_err(|e| ConfigError::Validation(vec![e.to_string()]))?;
        context.set_default_locale(self.default_locale.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        assert!(RelativeTimeConfig::default().validate().is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            RelativeTimeConfig::from_json_str(r#"{"thresholds": {"second": 60}}"#).unwrap();
        assert_eq!(config.thresholds.second, 60);
        assert_eq!(config.thresholds.hour, 22);
        assert_eq!(config.default_locale, "en");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            RelativeTimeConfig::from_json_str(r#"{"thresholds": {"week": 4}}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = RelativeTimeConfig {
            default_locale: "english".into(),
            thresholds: ThresholdTable {
                hour: 0,
                month: 0,
                ..ThresholdTable::default()
            },
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("thresholds.hour")));
    }

    #[test]
    fn apply_publishes_into_context() {
        let ctx = RelativeTimeContext::new();
        let config = RelativeTimeConfig {
            default_locale: "fr-CA".into(),
            thresholds: ThresholdTable::default().with(Unit::Day, 7).unwrap(),
        };
        config.apply(&ctx).unwrap();
        assert_eq!(ctx.default_locale(), "fr-CA");
        assert_eq!(ctx.thresholds().day, 7);
    }

    #[test]
    fn invalid_config_is_not_applied() {
        let ctx = RelativeTimeContext::new();
        let config = RelativeTimeConfig {
            default_locale: "!!".into(),
            ..RelativeTimeConfig::default()
        };
        assert!(matches!(
            config.apply(&ctx),
            Err(ConfigError::Validation(_))
        ));
        assert_eq!(ctx.default_locale(), "en");
    }

    #[test]
    fn loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_locale": "ru"}}"#).unwrap();
        let config = RelativeTimeConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.default_locale, "ru");
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            RelativeTimeConfig::from_json_file("/nonexistent/reltime.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn loads_from_toml() {
        let config = RelativeTimeConfig::from_toml_str(
            "default_locale = \"fr\"\n[thresholds]\nminute = 50\n",
        )
        .unwrap();
        assert_eq!(config.default_locale, "fr");
        assert_eq!(config.thresholds.minute, 50);
        assert_eq!(config.thresholds.second, 45);
    }
}
