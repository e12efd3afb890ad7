//! Typed host data model

mod record;
pub mod types;
mod value;

pub use record::*;
pub use value::*;
