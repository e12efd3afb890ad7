//! Data-binding and layout engine for a tabbed record grid.
//!
//! Binds a host data source (records, column schema, sort order, selection)
//! to a render-ready projection: column descriptors with proportional
//! widths, formatted rows with navigable references, locale-aware client
//! sorting, category tabs derived from one field, and a selection kept in
//! sync with the source. Drawing is left to the host's rendering toolkit.

pub mod category;
pub mod config;
pub mod dataset;
pub mod error;
pub mod grid;
pub mod locale;
pub mod logging;
pub mod model;
pub mod render;
pub mod rows;
pub mod schema;
pub mod selection;
pub mod sort;
pub mod width;

pub use grid::{GridEngine, GridView, RefreshOutcome};
