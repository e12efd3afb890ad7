//! One-time logger setup for hosts.
//!
//! The library itself only logs through the `log` facade; a host that wants
//! the output in a file calls [`init_file_logger`] once at startup.

use std::fs::File;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::GridError;

/// Installs a file logger at `level`, truncating `path`.
///
/// Fails if the file cannot be created or a logger is already installed.
pub fn init_file_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), GridError> {
    let path = path.as_ref();
    let log_file = File::create(path)
        .map_err(|e| GridError::Logging(format!("{}: {}", path.display(), e)))?;
    WriteLogger::init(level, Config::default(), log_file)
        .map_err(|e| GridError::Logging(e.to_string()))
}
