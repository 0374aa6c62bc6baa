//! Monitor configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock filter. Example:
//!
//! ```toml
//! precedence = "translation_first"
//!
//! [filter]
//! alpha = 0.9
//! action_threshold = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::ActionPrecedence;
use crate::error::{Error, Result};
use crate::signal::FilterConfig;

/// Configuration for the complete monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Gravity filter and noise gate parameters.
    pub filter: FilterConfig,
    /// Merge policy for the two gesture rules.
    pub precedence: ActionPrecedence,
}

impl MonitorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: MonitorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading monitor configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.filter.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{ACTION_THRESHOLD, ALPHA};
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MonitorConfig::from_toml_str("").unwrap();
        assert_eq!(config, MonitorConfig::default());
        assert_eq!(config.filter.alpha, ALPHA);
        assert_eq!(config.filter.action_threshold, ACTION_THRESHOLD);
        assert_eq!(config.precedence, ActionPrecedence::RotationFirst);
    }

    #[test]
    fn test_partial_document() {
        let config = MonitorConfig::from_toml_str(
            r#"
            precedence = "translation_first"

            [filter]
            action_threshold = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.precedence, ActionPrecedence::TranslationFirst);
        assert_eq!(config.filter.action_threshold, 0.5);
        assert_eq!(config.filter.alpha, ALPHA);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = MonitorConfig::from_toml_str("[filter]\nalpha = -0.1\n");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let result = MonitorConfig::from_toml_str("precedence = \"sideways\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[filter]\nalpha = 0.5").unwrap();

        let config = MonitorConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.filter.alpha, 0.5);
    }

    #[test]
    fn test_missing_file() {
        let result = MonitorConfig::from_toml_file("/nonexistent/gesture.toml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
