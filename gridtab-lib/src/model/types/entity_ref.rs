//! Entity reference type for lookups and record navigation

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A reference to a host record.
///
/// Lookup fields carry one of these as their raw value. The grid also
/// synthesizes one for every row of the primary column so the primary cell can
/// navigate to its own record. The handle is opaque to the grid: it is only
/// handed back to the data source through `DataSet::open_record`.
///
/// # Example
///
/// ```
/// use gridtab_lib::model::types::EntityReference;
/// use uuid::Uuid;
///
/// let id = Uuid::new_v4();
/// let contact = EntityReference::with_name("contact", id, "John Smith");
/// assert_eq!(contact.display_name(), "John Smith");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    /// The unique identifier of the referenced record.
    pub id: Uuid,
    /// The logical name of the entity (e.g., "contact").
    #[serde(rename = "etn")]
    pub logical_name: String,
    /// The display name of the referenced record, if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityReference {
    /// Creates a new entity reference.
    pub fn new(logical_name: impl Into<String>, id: Uuid) -> Self {
        Self {
            id,
            logical_name: logical_name.into(),
            name: None,
        }
    }

    /// Creates a new entity reference with a display name.
    pub fn with_name(logical_name: impl Into<String>, id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            logical_name: logical_name.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the display name, or the empty string when none is known.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
