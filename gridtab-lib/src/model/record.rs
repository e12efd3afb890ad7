//! Host record with raw and formatted field values

use std::collections::HashMap;

use uuid::Uuid;

use super::Value;
use super::types::EntityReference;

/// A record of the current page, as exposed by the host data source.
///
/// Holds the raw value of every field plus the host's formatted (localized)
/// display text. The grid displays formatted text and compares raw values.
///
/// # Example
///
/// ```
/// use gridtab_lib::model::Record;
/// use gridtab_lib::model::types::OptionSetValue;
/// use uuid::Uuid;
///
/// let record = Record::new("incident", Uuid::from_u128(1))
///     .with_name("Printer on fire")
///     .set("title", "Printer on fire")
///     .set_with_formatted("statuscode", OptionSetValue::new(1), "In Progress");
///
/// assert_eq!(record.formatted("statuscode"), "In Progress");
/// assert_eq!(record.formatted("title"), "Printer on fire");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The logical name of the entity.
    pub(crate) entity_name: String,

    /// The unique identifier of the record.
    pub(crate) id: Uuid,

    /// The value of the entity's primary name field.
    pub(crate) name: Option<String>,

    /// The raw field values.
    pub(crate) fields: HashMap<String, Value>,

    /// Formatted display values supplied by the host.
    pub(crate) formatted_values: HashMap<String, String>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new(entity_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            entity_name: entity_name.into(),
            id,
            name: None,
            fields: HashMap::new(),
            formatted_values: HashMap::new(),
        }
    }

    /// Sets the primary name (builder pattern).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Returns the entity logical name.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Returns the record ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the record ID in the string form used as row key.
    pub fn record_id(&self) -> String {
        self.id.to_string()
    }

    /// Returns the primary name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns a reference to this record itself (logical name, id and name).
    pub fn named_reference(&self) -> EntityReference {
        EntityReference {
            id: self.id,
            logical_name: self.entity_name.clone(),
            name: self.name.clone(),
        }
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// Returns the raw field value, if the field exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the host-supplied formatted value, if any.
    pub fn get_formatted(&self, field: &str) -> Option<&str> {
        self.formatted_values.get(field).map(|s| s.as_str())
    }

    /// Returns the display text for a field.
    ///
    /// Uses the host's formatted value when present, otherwise derives one
    /// from the raw value. Missing fields format as the empty string.
    pub fn formatted(&self, field: &str) -> String {
        match self.formatted_values.get(field) {
            Some(text) => text.clone(),
            None => self
                .fields
                .get(field)
                .map(Value::display_string)
                .unwrap_or_default(),
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field value together with its formatted text (builder pattern).
    pub fn set_with_formatted(
        mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
        formatted: impl Into<String>,
    ) -> Self {
        let field = field.into();
        self.formatted_values.insert(field.clone(), formatted.into());
        self.fields.insert(field, value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Sets a formatted value.
    pub fn set_formatted(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.formatted_values.insert(field.into(), value.into());
    }
}
