//! Row projection: host records to render-ready row items.

use std::collections::HashMap;

use log::{trace, warn};
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::dataset::DataSet;
use crate::model::Record;
use crate::model::types::EntityReference;
use crate::schema::ColumnDescriptor;

/// Suffix of the reference entry next to a link column's value.
pub const REF_SUFFIX: &str = "_ref";

/// Suffix of the raw category value entry.
pub const RAW_SUFFIX: &str = "_raw";

/// Raw and display form of a row's category field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryValue {
    /// Stringified raw value, used for equality.
    pub raw: String,
    /// Formatted label.
    pub label: String,
}

/// One render-ready row.
///
/// Serializes to the flat shape rendering toolkits expect: `key`, one entry
/// per column alias, `<alias>_ref` for link columns and
/// `<category field>_raw` for the raw category value.
#[derive(Debug, Clone, PartialEq)]
pub struct RowItem {
    key: String,
    values: HashMap<String, String>,
    references: HashMap<String, EntityReference>,
    category_field: String,
    category: Option<CategoryValue>,
}

impl RowItem {
    /// Creates an empty row for the given category field.
    pub fn new(key: impl Into<String>, category_field: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: HashMap::new(),
            references: HashMap::new(),
            category_field: category_field.into(),
            category: None,
        }
    }

    /// Sets a display value (builder pattern).
    pub fn with_value(mut self, alias: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(alias.into(), value.into());
        self
    }

    /// Sets a reference (builder pattern).
    pub fn with_reference(mut self, alias: impl Into<String>, reference: EntityReference) -> Self {
        self.references.insert(alias.into(), reference);
        self
    }

    /// Sets the category value (builder pattern).
    pub fn with_category(mut self, raw: impl Into<String>, label: impl Into<String>) -> Self {
        self.category = Some(CategoryValue {
            raw: raw.into(),
            label: label.into(),
        });
        self
    }

    /// The source record's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display value under a column alias.
    pub fn value(&self, alias: &str) -> Option<&str> {
        self.values.get(alias).map(|s| s.as_str())
    }

    /// Reference handle under a column alias.
    pub fn reference(&self, alias: &str) -> Option<&EntityReference> {
        self.references.get(alias)
    }

    /// The field the category value was stamped from.
    pub fn category_field(&self) -> &str {
        &self.category_field
    }

    /// Category value, if the row carries one for `field`.
    pub fn category_for(&self, field: &str) -> Option<&CategoryValue> {
        if self.category_field == field {
            self.category.as_ref()
        } else {
            None
        }
    }
}

impl Serialize for RowItem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("key", &self.key)?;

        let mut aliases: Vec<&String> = self.values.keys().collect();
        aliases.sort();
        for alias in aliases {
            map.serialize_entry(alias, &self.values[alias])?;
        }

        let mut aliases: Vec<&String> = self.references.keys().collect();
        aliases.sort();
        for alias in aliases {
            map.serialize_entry(&format!("{alias}{REF_SUFFIX}"), &self.references[alias])?;
        }

        map.serialize_entry(
            &format!("{}{RAW_SUFFIX}", self.category_field),
            &self.category.as_ref().map(|c| c.raw.as_str()),
        )?;
        map.end()
    }
}

/// Projects one record.
///
/// Values are read by column key and written under the column alias. A
/// reference is kept for columns whose raw value is a reference, and
/// synthesized from the record itself for the primary column.
pub fn project_record(columns: &[ColumnDescriptor], record: &Record, category_field: &str) -> RowItem {
    let mut row = RowItem::new(record.record_id(), category_field);

    for column in columns {
        row.values
            .insert(column.field_alias.clone(), record.formatted(&column.key));

        match record.get(&column.key).and_then(|v| v.as_reference()) {
            Some(reference) => {
                row.references
                    .insert(column.field_alias.clone(), reference.clone());
            }
            None if column.is_primary => {
                row.references
                    .insert(column.field_alias.clone(), record.named_reference());
            }
            None => {}
        }
    }

    row.category = record
        .get(category_field)
        .and_then(|v| v.raw_string())
        .map(|raw| CategoryValue {
            raw,
            label: record.formatted(category_field),
        });
    row
}

/// Projects records into rows, preserving their order.
pub fn project_rows<'a>(
    columns: &[ColumnDescriptor],
    records: impl IntoIterator<Item = &'a Record>,
    category_field: &str,
) -> Vec<RowItem> {
    let rows: Vec<RowItem> = records
        .into_iter()
        .map(|record| project_record(columns, record, category_field))
        .collect();
    trace!("Projected {} rows over {} columns", rows.len(), columns.len());
    rows
}

/// Projects the current page of a data source, in host order.
///
/// Ids the source lists but cannot resolve are skipped.
pub fn project_data_set(
    columns: &[ColumnDescriptor],
    data: &dyn DataSet,
    category_field: &str,
) -> Vec<RowItem> {
    let records = data.sorted_record_ids().iter().filter_map(|id| {
        let record = data.record(id);
        if record.is_none() {
            warn!("Data set lists record '{}' but does not provide it", id);
        }
        record
    });
    project_rows(columns, records, category_field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSetColumn;
    use crate::model::Value;
    use crate::model::types::OptionSetValue;
    use crate::schema::map_schema;
    use crate::width::{WidthAllocation, WidthPolicy};
    use uuid::Uuid;

    fn columns() -> Vec<ColumnDescriptor> {
        let schema = vec![
            DataSetColumn::new("title", "Title", "SingleLine.Text", 2.0).primary(),
            DataSetColumn::new("customerid", "Customer", "Lookup.Customer", 1.0)
                .with_alias("cust"),
            DataSetColumn::new("description", "Description", "Multiple", 1.0),
        ];
        map_schema(&schema, &WidthAllocation::default(), &[], &WidthPolicy::default())
    }

    fn record() -> Record {
        let customer = EntityReference::with_name("account", Uuid::from_u128(50), "Contoso");
        Record::new("incident", Uuid::from_u128(1))
            .with_name("Broken printer")
            .set("title", "Broken printer")
            .set_with_formatted("customerid", customer, "Contoso")
            .set("description", Value::Null)
            .set_with_formatted("statuscode", OptionSetValue::new(1), "In Progress")
    }

    #[test]
    fn test_values_written_under_alias() {
        let row = project_record(&columns(), &record(), "statuscode");
        assert_eq!(row.key(), Uuid::from_u128(1).to_string());
        assert_eq!(row.value("title"), Some("Broken printer"));
        assert_eq!(row.value("cust"), Some("Contoso"));
        assert_eq!(row.value("customerid"), None);
        assert_eq!(row.value("description"), Some(""));
    }

    #[test]
    fn test_references() {
        let row = project_record(&columns(), &record(), "statuscode");

        let customer = row.reference("cust").unwrap();
        assert_eq!(customer.logical_name, "account");

        let own = row.reference("title").unwrap();
        assert_eq!(own.logical_name, "incident");
        assert_eq!(own.id, Uuid::from_u128(1));
        assert_eq!(own.name.as_deref(), Some("Broken printer"));

        assert!(row.reference("description").is_none());
    }

    #[test]
    fn test_category_raw_and_label() {
        let row = project_record(&columns(), &record(), "statuscode");
        let category = row.category_for("statuscode").unwrap();
        assert_eq!(category.raw, "1");
        assert_eq!(category.label, "In Progress");
        assert!(row.category_for("prioritycode").is_none());
    }

    #[test]
    fn test_missing_category_field() {
        let row = project_record(&columns(), &record(), "prioritycode");
        assert!(row.category_for("prioritycode").is_none());
    }

    #[test]
    fn test_serializes_flat_shape() {
        let row = project_record(&columns(), &record(), "statuscode");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["key"], Uuid::from_u128(1).to_string());
        assert_eq!(json["cust"], "Contoso");
        assert_eq!(json["cust_ref"]["etn"], "account");
        assert_eq!(json["title_ref"]["name"], "Broken printer");
        assert_eq!(json["statuscode_raw"], "1");
        assert!(json.get("description_ref").is_none());
    }
}
