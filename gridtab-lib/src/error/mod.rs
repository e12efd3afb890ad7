//! Error types

mod config;
mod grid;

pub use config::*;
pub use grid::*;
