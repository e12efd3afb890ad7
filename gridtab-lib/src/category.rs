//! Category tabs derived from one designated field.

use std::collections::HashSet;

use log::{debug, trace};
use serde::Serialize;

use crate::rows::RowItem;

/// One category tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    /// Raw field value, stringified.
    pub value: String,
    /// Display label.
    pub label: String,
}

/// Distinct categories of `rows`, in first-seen order.
///
/// The first row carrying a raw value decides that category's label. Rows
/// without a value for `category_field` contribute nothing.
///
/// # Example
///
/// ```
/// use gridtab_lib::category::derive_categories;
/// use gridtab_lib::rows::RowItem;
///
/// let rows = vec![
///     RowItem::new("1", "statuscode").with_category("2", "Closed"),
///     RowItem::new("2", "statuscode").with_category("1", "Open"),
///     RowItem::new("3", "statuscode").with_category("2", "Closed (old label)"),
/// ];
/// let tabs = derive_categories(&rows, "statuscode");
/// assert_eq!(tabs.len(), 2);
/// assert_eq!(tabs[0].label, "Closed");
/// ```
pub fn derive_categories(rows: &[RowItem], category_field: &str) -> Vec<CategoryTab> {
    let mut seen = HashSet::new();
    let tabs: Vec<CategoryTab> = rows
        .iter()
        .filter_map(|row| row.category_for(category_field))
        .filter(|category| seen.insert(category.raw.as_str()))
        .map(|category| CategoryTab {
            value: category.raw.clone(),
            label: category.label.clone(),
        })
        .collect();
    trace!("Derived {} categories from '{}'", tabs.len(), category_field);
    tabs
}

/// Chooses the active category after the tabs were re-derived.
///
/// Keeps `current` while it is still one of `tabs`; otherwise, or when
/// nothing is selected, picks the first tab. With no tabs at all the current
/// choice is left as is.
pub fn select_default(tabs: &[CategoryTab], current: Option<&str>) -> Option<String> {
    let Some(first) = tabs.first() else {
        return current.map(str::to_string);
    };
    match current {
        Some(value) if tabs.iter().any(|t| t.value == value) => Some(value.to_string()),
        Some(stale) => {
            debug!("Category '{}' no longer present, selecting '{}'", stale, first.value);
            Some(first.value.clone())
        }
        None => Some(first.value.clone()),
    }
}

/// Rows whose raw category equals `selected`; all rows when nothing is
/// selected.
pub fn filter_by_category(
    rows: &[RowItem],
    category_field: &str,
    selected: Option<&str>,
) -> Vec<RowItem> {
    let Some(selected) = selected else {
        return rows.to_vec();
    };
    rows.iter()
        .filter(|row| {
            row.category_for(category_field)
                .is_some_and(|c| c.raw == selected)
        })
        .cloned()
        .collect()
}
