//! Top-level grid error

use super::ConfigError;

/// Errors surfaced by the grid's host-facing calls.
///
/// The projection stages themselves never fail; these cover configuration,
/// logger setup and record navigation.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No row with the given key is currently projected.
    #[error("No row with key '{0}'")]
    UnknownRow(String),

    /// No column with the given alias is currently mapped.
    #[error("No column with alias '{0}'")]
    UnknownColumn(String),

    /// The cell carries no reference to navigate to.
    #[error("Cell '{alias}' of row '{row}' has no record reference")]
    NotNavigable { row: String, alias: String },

    /// The logger could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
