//! Grid configuration

use serde::Deserialize;

use crate::error::ConfigError;
use crate::selection::SelectionMode;

/// Tunables for the grid engine.
///
/// Every field has a default, so a host only lists what it overrides.
///
/// # Example
///
/// ```
/// use gridtab_lib::config::GridConfig;
///
/// let config = GridConfig::default()
///     .with_category_field("prioritycode")
///     .with_width_margin(200);
/// assert_eq!(config.category_field, "prioritycode");
///
/// let parsed = GridConfig::from_json(r#"{"fallback_language": "de"}"#).unwrap();
/// assert_eq!(parsed.fallback_language, "de");
/// assert_eq!(parsed.width_margin, 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width reserved for non-column chrome (selection checkboxes, scrollbar).
    ///
    /// Default: 250
    pub width_margin: u32,

    /// Floor applied to every allocated column width.
    ///
    /// Default: 5
    pub min_column_width: u32,

    /// Language code used when the user's locale cannot be resolved.
    ///
    /// Default: "en"
    pub fallback_language: String,

    /// Field whose raw values become the category tabs.
    ///
    /// Default: "statuscode"
    pub category_field: String,

    /// How many rows may be selected at once.
    ///
    /// Default: multiple
    pub selection_mode: SelectionMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width_margin: 250,
            min_column_width: 5,
            fallback_language: "en".to_string(),
            category_field: "statuscode".to_string(),
            selection_mode: SelectionMode::Multiple,
        }
    }
}

impl GridConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.category_field.trim().is_empty() {
            return Err(ConfigError::invalid("category_field", "must not be empty"));
        }
        if self.fallback_language.len() != 2
            || !self.fallback_language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ConfigError::invalid(
                "fallback_language",
                format!("'{}' is not a two-letter language code", self.fallback_language),
            ));
        }
        if self.min_column_width == 0 {
            return Err(ConfigError::invalid("min_column_width", "must be at least 1"));
        }
        Ok(())
    }

    /// Sets the chrome margin.
    pub fn with_width_margin(mut self, margin: u32) -> Self {
        self.width_margin = margin;
        self
    }

    /// Sets the minimum column width.
    pub fn with_min_column_width(mut self, width: u32) -> Self {
        self.min_column_width = width;
        self
    }

    /// Sets the fallback language code.
    pub fn with_fallback_language(mut self, language: impl Into<String>) -> Self {
        self.fallback_language = language.into();
        self
    }

    /// Sets the category field.
    pub fn with_category_field(mut self, field: impl Into<String>) -> Self {
        self.category_field = field.into();
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_host_control() {
        let config = GridConfig::default();
        assert_eq!(config.width_margin, 250);
        assert_eq!(config.min_column_width, 5);
        assert_eq!(config.fallback_language, "en");
        assert_eq!(config.category_field, "statuscode");
        assert_eq!(config.selection_mode, SelectionMode::Multiple);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            GridConfig::from_json(r#"{"category_field": "prioritycode", "selection_mode": "single"}"#)
                .unwrap();
        assert_eq!(config.category_field, "prioritycode");
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert_eq!(config.width_margin, 250);
    }

    #[test]
    fn test_from_json_rejects_bad_language() {
        let err = GridConfig::from_json(r#"{"fallback_language": "english"}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                setting: "fallback_language",
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = GridConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_empty_category_field() {
        let config = GridConfig::default().with_category_field("  ");
        assert!(config.validate().is_err());
    }
}
