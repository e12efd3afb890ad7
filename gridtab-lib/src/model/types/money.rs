//! Money type

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

/// A monetary value represented as a decimal.
///
/// The currency lives in a separate host field; the grid only ever shows the
/// host's formatted text for money columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    /// Creates a new Money value.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates a Money value from whole units.
    pub fn from_int(value: i64) -> Self {
        Self(Decimal::new(value, 0))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
