//! Configuration errors

/// Error loading or validating a [`GridConfig`](crate::config::GridConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Failed to parse grid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting holds a value the grid cannot work with.
    #[error("Invalid value for '{setting}': {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new invalid setting error.
    pub fn invalid(setting: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            setting,
            reason: reason.into(),
        }
    }
}
