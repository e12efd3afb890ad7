//! Host data types carried by field values

mod entity_ref;
mod money;
mod option_set;

pub use entity_ref::*;
pub use money::*;
pub use option_set::*;
