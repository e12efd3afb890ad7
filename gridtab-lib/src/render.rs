//! Cell render strategies handed to the rendering toolkit.

use serde::Serialize;

use crate::model::types::EntityReference;
use crate::rows::RowItem;
use crate::schema::{ColumnDescriptor, ColumnKind};

/// What a cell should render as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderedCell {
    /// Plain text.
    Text { text: String },
    /// A link that asks the data source to open `reference`.
    Navigate {
        text: String,
        reference: EntityReference,
    },
    /// A link to an external URI.
    Href { text: String, href: String },
}

impl RenderedCell {
    /// The visible text.
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Navigate { text, .. } | Self::Href { text, .. } => text,
        }
    }
}

/// Renders the cell of `row` under `column`.
///
/// Link columns without a reference on this row render as text.
///
/// # Example
///
/// ```
/// use gridtab_lib::dataset::DataSetColumn;
/// use gridtab_lib::render::{render_cell, RenderedCell};
/// use gridtab_lib::rows::RowItem;
/// use gridtab_lib::schema::map_schema;
/// use gridtab_lib::width::{WidthAllocation, WidthPolicy};
///
/// let schema = vec![DataSetColumn::new("emailaddress1", "Email", "SingleLine.Email", 1.0)];
/// let columns = map_schema(&schema, &WidthAllocation::default(), &[], &WidthPolicy::default());
/// let row = RowItem::new("1", "statuscode").with_value("emailaddress1", "ann@contoso.com");
///
/// assert_eq!(
///     render_cell(&columns[0], &row),
///     RenderedCell::Href {
///         text: "ann@contoso.com".to_string(),
///         href: "mailto:ann@contoso.com".to_string(),
///     }
/// );
/// ```
pub fn render_cell(column: &ColumnDescriptor, row: &RowItem) -> RenderedCell {
    let text = row.value(&column.field_alias).unwrap_or("").to_string();
    match column.kind {
        ColumnKind::Plain | ColumnKind::OptionSet => RenderedCell::Text { text },
        ColumnKind::Lookup | ColumnKind::Primary => match row.reference(&column.field_alias) {
            Some(reference) => RenderedCell::Navigate {
                text,
                reference: reference.clone(),
            },
            None => RenderedCell::Text { text },
        },
        ColumnKind::Email => RenderedCell::Href {
            href: format!("mailto:{text}"),
            text,
        },
        ColumnKind::Phone => RenderedCell::Href {
            href: format!("skype:{text}?call"),
            text,
        },
    }
}

/// Renders a whole row in column order.
pub fn render_row(columns: &[ColumnDescriptor], row: &RowItem) -> Vec<RenderedCell> {
    columns.iter().map(|c| render_cell(c, row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSetColumn;
    use crate::schema::map_schema;
    use crate::width::{WidthAllocation, WidthPolicy};
    use uuid::Uuid;

    fn columns() -> Vec<ColumnDescriptor> {
        let schema = vec![
            DataSetColumn::new("fullname", "Name", "SingleLine.Text", 1.0).primary(),
            DataSetColumn::new("parentcustomerid", "Company", "Lookup.Customer", 1.0),
            DataSetColumn::new("telephone1", "Phone", "SingleLine.Phone", 1.0),
            DataSetColumn::new("statuscode", "Status", "Status", 1.0),
        ];
        map_schema(&schema, &WidthAllocation::default(), &[], &WidthPolicy::default())
    }

    #[test]
    fn test_render_row() {
        let own = EntityReference::with_name("contact", Uuid::from_u128(1), "Ann");
        let row = RowItem::new("1", "statuscode")
            .with_value("fullname", "Ann")
            .with_reference("fullname", own.clone())
            .with_value("parentcustomerid", "")
            .with_value("telephone1", "+1 555 0100")
            .with_value("statuscode", "Active");

        let cells = render_row(&columns(), &row);
        assert_eq!(
            cells[0],
            RenderedCell::Navigate {
                text: "Ann".to_string(),
                reference: own
            }
        );
        // lookup without a value has no reference
        assert_eq!(cells[1], RenderedCell::Text { text: String::new() });
        assert_eq!(
            cells[2],
            RenderedCell::Href {
                text: "+1 555 0100".to_string(),
                href: "skype:+1 555 0100?call".to_string()
            }
        );
        assert_eq!(cells[3].text(), "Active");
    }

    #[test]
    fn test_serialized_tag() {
        let cell = RenderedCell::Text { text: "x".to_string() };
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["type"], "text");
    }
}
