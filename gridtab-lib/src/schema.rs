//! Maps the host column schema to grid column descriptors.

use log::trace;
use serde::Serialize;

use crate::dataset::{DataSetColumn, SortDirection, SortStatus};
use crate::width::{WidthAllocation, WidthPolicy};

/// Render strategy of a column, derived from its host data type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKind {
    /// Plain text and every type without a dedicated strategy.
    Plain,
    /// Option set, state or status: shows the formatted label.
    OptionSet,
    /// Lookup to another record: a navigation link.
    Lookup,
    /// The entity's primary name column: a link to the row's own record.
    Primary,
    /// Email address: a `mailto:` link.
    Email,
    /// Phone number: a call link.
    Phone,
}

impl ColumnKind {
    /// Derives the kind from a host data type tag and the primary flag.
    ///
    /// Option-set types win over the primary flag; lookups and the primary
    /// column win over email and phone.
    ///
    /// # Example
    ///
    /// ```
    /// use gridtab_lib::schema::ColumnKind;
    ///
    /// assert_eq!(ColumnKind::from_data_type("Lookup.Customer", false), ColumnKind::Lookup);
    /// assert_eq!(ColumnKind::from_data_type("SingleLine.Text", true), ColumnKind::Primary);
    /// assert_eq!(ColumnKind::from_data_type("Status", true), ColumnKind::OptionSet);
    /// ```
    pub fn from_data_type(data_type: &str, is_primary: bool) -> Self {
        match data_type {
            "OptionSet" | "State" | "Status" => Self::OptionSet,
            t if t.starts_with("Lookup.") => Self::Lookup,
            _ if is_primary => Self::Primary,
            "SingleLine.Email" => Self::Email,
            "SingleLine.Phone" => Self::Phone,
            _ => Self::Plain,
        }
    }

    /// Whether cells of this kind navigate to a record.
    pub fn is_navigable(self) -> bool {
        matches!(self, Self::Lookup | Self::Primary)
    }
}

/// Sort flags shown in a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub is_sorted: bool,
    pub descending: bool,
}

impl SortState {
    /// Sorted ascending or descending.
    pub fn sorted(descending: bool) -> Self {
        Self {
            is_sorted: true,
            descending,
        }
    }
}

/// A render-ready column.
///
/// Descriptors are immutable snapshots: stages that change widths or sort
/// flags return a new column list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Stable field identifier (host column name).
    pub key: String,
    /// Header text.
    pub display_name: String,
    /// Projection key into row items.
    pub field_alias: String,
    /// Host data type tag.
    pub data_type: String,
    /// Render strategy.
    pub kind: ColumnKind,
    pub is_primary: bool,
    /// Relative weight from the schema.
    pub current_width_factor: f64,
    /// Allocated width.
    pub computed_max_width: u32,
    /// Floor width.
    pub min_width: u32,
    pub is_resizable: bool,
    pub sort: SortState,
    pub sort_ascending_aria_label: &'static str,
    pub sort_descending_aria_label: &'static str,
}

impl ColumnDescriptor {
    /// Returns a copy with new sort flags.
    pub fn with_sort(&self, sort: SortState) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Returns a copy with a new allocated width.
    pub fn with_max_width(&self, width: u32) -> Self {
        Self {
            computed_max_width: width,
            ..self.clone()
        }
    }
}

/// Builds column descriptors for a schema snapshot.
///
/// Widths come from `allocation` by alias, falling back to the column's own
/// weight when no allocation exists yet. Every column named in the host's
/// sort list starts out sorted, descending iff its first entry there is
/// descending. A header click narrows this to one sorted column.
///
/// # Example
///
/// ```
/// use gridtab_lib::dataset::{DataSetColumn, SortStatus};
/// use gridtab_lib::schema::map_schema;
/// use gridtab_lib::width::{WidthAllocation, WidthPolicy};
///
/// let schema = vec![DataSetColumn::new("name", "Name", "SingleLine.Text", 120.0).primary()];
/// let columns = map_schema(
///     &schema,
///     &WidthAllocation::default(),
///     &[SortStatus::desc("name")],
///     &WidthPolicy::default(),
/// );
/// assert_eq!(columns[0].computed_max_width, 120);
/// assert!(columns[0].sort.is_sorted && columns[0].sort.descending);
/// ```
pub fn map_schema(
    schema: &[DataSetColumn],
    allocation: &WidthAllocation,
    sorting: &[SortStatus],
    policy: &WidthPolicy,
) -> Vec<ColumnDescriptor> {
    let columns: Vec<ColumnDescriptor> = schema
        .iter()
        .map(|column| {
            let sort = match sorting.iter().find(|s| s.name == column.name) {
                Some(s) => SortState::sorted(s.direction == SortDirection::Descending),
                None => SortState::default(),
            };
            ColumnDescriptor {
                key: column.name.clone(),
                display_name: column.display_name.clone(),
                field_alias: column.alias.clone(),
                data_type: column.data_type.clone(),
                kind: ColumnKind::from_data_type(&column.data_type, column.is_primary),
                is_primary: column.is_primary,
                current_width_factor: column.visual_size_factor,
                computed_max_width: allocation
                    .get(&column.alias)
                    .unwrap_or_else(|| weight_width(column.visual_size_factor)),
                min_width: policy.min_width,
                is_resizable: true,
                sort,
                sort_ascending_aria_label: "Sorted A to Z",
                sort_descending_aria_label: "Sorted Z to A",
            }
        })
        .collect();

    trace!("Mapped {} schema columns", columns.len());
    columns
}

/// Returns new snapshots carrying the widths from `allocation`.
///
/// Columns missing from the allocation keep their current width.
pub fn apply_allocation(
    columns: &[ColumnDescriptor],
    allocation: &WidthAllocation,
) -> Vec<ColumnDescriptor> {
    columns
        .iter()
        .map(|c| match allocation.get(&c.field_alias) {
            Some(width) => c.with_max_width(width),
            None => c.clone(),
        })
        .collect()
}

/// Column-set signature: the ordered `(key, alias)` pairs.
///
/// Two schema snapshots with the same signature map to the same columns
/// apart from widths and sort flags.
pub fn schema_signature(schema: &[DataSetColumn]) -> Vec<(String, String)> {
    schema
        .iter()
        .map(|c| (c.name.clone(), c.alias.clone()))
        .collect()
}

fn weight_width(weight: f64) -> u32 {
    if weight.is_finite() && weight > 0.0 {
        weight.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
