//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::types::EntityReference;
use super::types::Money;
use super::types::MultiSelectOptionSetValue;
use super::types::OptionSetValue;

/// A raw (unformatted) field value as handed over by the host data source.
///
/// | Host Type | Rust Variant |
/// |-----------|--------------|
/// | null | `Null` |
/// | TwoOptions | `Bool` |
/// | Whole.None | `Int` |
/// | BigInt | `Long` |
/// | FP | `Float` |
/// | Decimal | `Decimal` |
/// | SingleLine.*, Multiple | `String` |
/// | UniqueIdentifier | `Guid` |
/// | DateAndTime.* | `DateTime` |
/// | Currency | `Money` |
/// | Lookup.* | `EntityReference` |
/// | OptionSet, State, Status | `OptionSet` |
/// | MultiSelectPicklist | `MultiOptionSet` |
///
/// # Example
///
/// ```
/// use gridtab_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let employees = Value::from(120i64);
/// assert_eq!(employees.raw_string().as_deref(), Some("120"));
/// assert!(Value::Null.raw_string().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// String value.
    String(String),
    /// Monetary value.
    Money(Money),
    /// Reference to another record (lookup).
    EntityReference(EntityReference),
    /// Single-select option set.
    OptionSet(OptionSetValue),
    /// Multi-select option set.
    MultiOptionSet(MultiSelectOptionSetValue),
}

impl Value {
    /// Returns `true` if this value is a reference to another record.
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::EntityReference(_))
    }

    /// Returns the reference handle if this value is one.
    pub fn as_reference(&self) -> Option<&EntityReference> {
        match self {
            Value::EntityReference(r) => Some(r),
            _ => None,
        }
    }

    /// Stringified raw form used for exact-match comparisons.
    ///
    /// Option sets stringify to their numeric code and references to their
    /// id, never to a localized label. `Null` has no raw form.
    pub fn raw_string(&self) -> Option<String> {
        let raw = match self {
            Value::Null => return None,
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Guid(g) => g.to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::String(s) => s.clone(),
            Value::Money(m) => m.to_string(),
            Value::EntityReference(r) => r.id.to_string(),
            Value::OptionSet(o) => o.value.to_string(),
            Value::MultiOptionSet(o) => o
                .values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(","),
        };
        Some(raw)
    }

    /// Best-effort display text for hosts that supply no formatted value.
    ///
    /// Labels and names are preferred over codes and ids.
    pub fn display_string(&self) -> String {
        match self {
            Value::EntityReference(r) => r
                .name
                .clone()
                .unwrap_or_else(|| r.id.to_string()),
            Value::OptionSet(o) => o.label.clone().unwrap_or_else(|| o.value.to_string()),
            Value::MultiOptionSet(o) => match &o.labels {
                Some(labels) => labels.join("; "),
                None => self.raw_string().unwrap_or_default(),
            },
            other => other.raw_string().unwrap_or_default(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::Money(v)
    }
}

impl From<EntityReference> for Value {
    fn from(v: EntityReference) -> Self {
        Value::EntityReference(v)
    }
}

impl From<OptionSetValue> for Value {
    fn from(v: OptionSetValue) -> Self {
        Value::OptionSet(v)
    }
}

impl From<MultiSelectOptionSetValue> for Value {
    fn from(v: MultiSelectOptionSetValue) -> Self {
        Value::MultiOptionSet(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
