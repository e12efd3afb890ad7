//! The host data source the grid binds to.
//!
//! The grid reads the current page, its column schema and the host's sort
//! order through [`DataSet`], and writes back only two things: the selected
//! record ids and "open this record" requests.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;
use crate::model::types::EntityReference;

// =============================================================================
// Schema
// =============================================================================

/// A column of the host view, as the host describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetColumn {
    /// Field logical name; used to read values from records.
    pub name: String,
    /// Localized header text.
    pub display_name: String,
    /// Projection key under which row values are stored.
    pub alias: String,
    /// Relative width weight.
    pub visual_size_factor: f64,
    /// Host data type tag, e.g. `"SingleLine.Email"` or `"Lookup.Simple"`.
    pub data_type: String,
    /// Whether this is the entity's primary name column.
    #[serde(default)]
    pub is_primary: bool,
}

impl DataSetColumn {
    /// Creates a column whose alias equals its name.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        data_type: impl Into<String>,
        visual_size_factor: f64,
    ) -> Self {
        let name = name.into();
        Self {
            alias: name.clone(),
            name,
            display_name: display_name.into(),
            visual_size_factor,
            data_type: data_type.into(),
            is_primary: false,
        }
    }

    /// Overrides the projection alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Marks the column as the primary name column.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

// =============================================================================
// Sorting and paging status
// =============================================================================

/// Host sort direction, with the host's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// `-1`: not sorted.
    #[default]
    None,
    /// `0`: ascending.
    Ascending,
    /// `1`: descending.
    Descending,
}

impl SortDirection {
    /// Maps a host direction code. Unknown codes mean "not sorted".
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ascending,
            1 => Self::Descending,
            _ => Self::None,
        }
    }

    /// Returns the host direction code.
    pub fn code(self) -> i32 {
        match self {
            Self::None => -1,
            Self::Ascending => 0,
            Self::Descending => 1,
        }
    }
}

/// One entry of the host's current sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStatus {
    /// Column name (not alias).
    pub name: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortStatus {
    /// Creates an ascending sort entry.
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Creates a descending sort entry.
    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Paging status of the host data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingStatus {
    /// Total number of records across pages, `-1` while unknown.
    pub total_result_count: i64,
    /// Whether another page can be loaded.
    pub has_next_page: bool,
    /// Records per page.
    pub page_size: usize,
}

impl PagingStatus {
    /// Returns `true` once the host knows how many records there are.
    pub fn is_count_known(&self) -> bool {
        self.total_result_count != -1
    }
}

impl Default for PagingStatus {
    fn default() -> Self {
        Self {
            total_result_count: -1,
            has_next_page: false,
            page_size: 50,
        }
    }
}

/// Identity of a data source snapshot.
///
/// Two snapshots with the same id are the same logical record set; the
/// selection handle survives only as long as the id stays the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataSetId(pub u64);

impl std::fmt::Display for DataSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dataset#{}", self.0)
    }
}

// =============================================================================
// DataSet trait
// =============================================================================

/// The host data source.
///
/// Implemented by the host runtime; the grid never fetches or caches data
/// itself.
pub trait DataSet {
    /// Identity of the current snapshot.
    fn id(&self) -> DataSetId;

    /// Whether the host is still loading the page.
    fn loading(&self) -> bool;

    /// The view's column schema, in display order.
    fn columns(&self) -> &[DataSetColumn];

    /// Record ids of the current page, in host order.
    fn sorted_record_ids(&self) -> &[String];

    /// Looks up a record of the current page.
    fn record(&self, id: &str) -> Option<&Record>;

    /// The host's current sort order.
    fn sorting(&self) -> &[SortStatus];

    /// Paging status.
    fn paging(&self) -> PagingStatus;

    /// Replaces the host's selected record ids.
    fn set_selected_record_ids(&mut self, ids: &[String]);

    /// Asks the host to open (navigate to) a record.
    fn open_record(&mut self, reference: &EntityReference);
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// A [`DataSet`] over an owned, fully loaded page.
///
/// Keeps every write the grid makes so callers can inspect them.
///
/// # Example
///
/// ```
/// use gridtab_lib::dataset::{DataSet, DataSetColumn, DataSetId, InMemoryDataSet};
/// use gridtab_lib::model::Record;
/// use uuid::Uuid;
///
/// let data = InMemoryDataSet::new(DataSetId(1))
///     .with_column(DataSetColumn::new("name", "Name", "SingleLine.Text", 100.0).primary())
///     .with_record(Record::new("account", Uuid::from_u128(1)).set("name", "Contoso"));
///
/// assert_eq!(data.sorted_record_ids().len(), 1);
/// assert_eq!(data.paging().total_result_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryDataSet {
    id: DataSetId,
    loading: bool,
    columns: Vec<DataSetColumn>,
    order: Vec<String>,
    records: HashMap<String, Record>,
    sorting: Vec<SortStatus>,
    paging: Option<PagingStatus>,
    selected_ids: Vec<String>,
    selection_pushes: usize,
    opened: Vec<EntityReference>,
}

impl InMemoryDataSet {
    /// Creates an empty data set with the given identity.
    pub fn new(id: DataSetId) -> Self {
        Self {
            id,
            loading: false,
            columns: Vec::new(),
            order: Vec::new(),
            records: HashMap::new(),
            sorting: Vec::new(),
            paging: None,
            selected_ids: Vec::new(),
            selection_pushes: 0,
            opened: Vec::new(),
        }
    }

    /// Adds a column (builder pattern).
    pub fn with_column(mut self, column: DataSetColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Replaces the column schema (builder pattern).
    pub fn with_columns(mut self, columns: Vec<DataSetColumn>) -> Self {
        self.columns = columns;
        self
    }

    /// Appends a record to the page (builder pattern).
    pub fn with_record(mut self, record: Record) -> Self {
        self.push_record(record);
        self
    }

    /// Appends records to the page (builder pattern).
    pub fn with_records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        for record in records {
            self.push_record(record);
        }
        self
    }

    /// Sets the host sort order (builder pattern).
    pub fn with_sorting(mut self, sorting: Vec<SortStatus>) -> Self {
        self.sorting = sorting;
        self
    }

    /// Overrides the paging status (builder pattern).
    ///
    /// Without an override the total count is the number of records.
    pub fn with_paging(mut self, paging: PagingStatus) -> Self {
        self.paging = Some(paging);
        self
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replaces the page with new records, keeping the identity.
    pub fn replace_records(&mut self, records: impl IntoIterator<Item = Record>) {
        self.order.clear();
        self.records.clear();
        for record in records {
            self.push_record(record);
        }
    }

    /// Replaces the column schema.
    pub fn set_columns(&mut self, columns: Vec<DataSetColumn>) {
        self.columns = columns;
    }

    /// The ids last pushed through [`DataSet::set_selected_record_ids`].
    pub fn selected_record_ids(&self) -> &[String] {
        &self.selected_ids
    }

    /// How many times the selection was pushed.
    pub fn selection_push_count(&self) -> usize {
        self.selection_pushes
    }

    /// Every reference passed to [`DataSet::open_record`], oldest first.
    pub fn opened_records(&self) -> &[EntityReference] {
        &self.opened
    }

    fn push_record(&mut self, record: Record) {
        let key = record.record_id();
        if self.records.insert(key.clone(), record).is_none() {
            self.order.push(key);
        }
    }
}

impl DataSet for InMemoryDataSet {
    fn id(&self) -> DataSetId {
        self.id
    }

    fn loading(&self) -> bool {
        self.loading
    }

    fn columns(&self) -> &[DataSetColumn] {
        &self.columns
    }

    fn sorted_record_ids(&self) -> &[String] {
        &self.order
    }

    fn record(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    fn sorting(&self) -> &[SortStatus] {
        &self.sorting
    }

    fn paging(&self) -> PagingStatus {
        self.paging.unwrap_or(PagingStatus {
            total_result_count: self.order.len() as i64,
            has_next_page: false,
            page_size: self.order.len(),
        })
    }

    fn set_selected_record_ids(&mut self, ids: &[String]) {
        self.selected_ids = ids.to_vec();
        self.selection_pushes += 1;
    }

    fn open_record(&mut self, reference: &EntityReference) {
        self.opened.push(reference.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_sort_direction_codes() {
        assert_eq!(SortDirection::from_code(1), SortDirection::Descending);
        assert_eq!(SortDirection::from_code(0), SortDirection::Ascending);
        assert_eq!(SortDirection::from_code(-1), SortDirection::None);
        assert_eq!(SortDirection::from_code(7), SortDirection::None);
        assert_eq!(SortDirection::Descending.code(), 1);
    }

    #[test]
    fn test_duplicate_record_keeps_first_position() {
        let id = Uuid::from_u128(1);
        let data = InMemoryDataSet::new(DataSetId(1))
            .with_record(Record::new("account", id).set("name", "A"))
            .with_record(Record::new("account", Uuid::from_u128(2)))
            .with_record(Record::new("account", id).set("name", "B"));

        assert_eq!(data.sorted_record_ids().len(), 2);
        assert_eq!(data.sorted_record_ids()[0], id.to_string());
        let record = data.record(&id.to_string()).unwrap();
        assert_eq!(record.formatted("name"), "B");
    }

    #[test]
    fn test_column_deserializes_host_shape() {
        let json = r#"{
            "name": "emailaddress1",
            "displayName": "Email",
            "alias": "emailaddress1",
            "visualSizeFactor": 150,
            "dataType": "SingleLine.Email"
        }"#;
        let column: DataSetColumn = serde_json::from_str(json).unwrap();
        assert_eq!(column.display_name, "Email");
        assert_eq!(column.visual_size_factor, 150.0);
        assert!(!column.is_primary);
    }
}
