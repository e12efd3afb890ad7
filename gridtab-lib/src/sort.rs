//! Client-side column sorting over the projected page.

use std::cmp::Ordering;

use log::trace;

use crate::locale::Collator;
use crate::rows::RowItem;
use crate::schema::{ColumnDescriptor, SortState};

/// A sort the grid should apply: column alias and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub field_alias: String,
    pub descending: bool,
}

/// Returns a sorted copy of `rows`; the input is left untouched.
///
/// Values compare as display strings (missing values as the empty string)
/// with `collator`. Rows that collate equal are ordered by their exact text
/// and then by key, so the order is total: descending is the exact reverse
/// of ascending, and sorting a sorted sequence again changes nothing.
///
/// # Example
///
/// ```
/// use gridtab_lib::locale::Collator;
/// use gridtab_lib::rows::RowItem;
/// use gridtab_lib::sort::sort_rows;
///
/// let rows: Vec<RowItem> = ["10", "2", "1"]
///     .iter()
///     .enumerate()
///     .map(|(i, v)| RowItem::new(i.to_string(), "statuscode").with_value("n", *v))
///     .collect();
/// let sorted = sort_rows(&rows, "n", false, &Collator::new("en"));
/// let values: Vec<&str> = sorted.iter().map(|r| r.value("n").unwrap()).collect();
/// assert_eq!(values, vec!["1", "2", "10"]);
/// ```
pub fn sort_rows(
    rows: &[RowItem],
    field_alias: &str,
    descending: bool,
    collator: &Collator,
) -> Vec<RowItem> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare_rows(a, b, field_alias, collator));
    if descending {
        sorted.reverse();
    }
    trace!(
        "Sorted {} rows by '{}' ({})",
        sorted.len(),
        field_alias,
        if descending { "descending" } else { "ascending" }
    );
    sorted
}

fn compare_rows(a: &RowItem, b: &RowItem, field_alias: &str, collator: &Collator) -> Ordering {
    let x = a.value(field_alias).unwrap_or("");
    let y = b.value(field_alias).unwrap_or("");
    collator
        .compare(x, y)
        .then_with(|| x.cmp(y))
        .then_with(|| a.key().cmp(b.key()))
}

/// Applies a header click to the column set.
///
/// Clicking the sorted column flips its direction; clicking any other
/// column sorts it ascending. The clicked column becomes the only sorted
/// one. Returns the new column snapshots and the sort to apply, or `None`
/// if no column has the given key.
pub fn toggle_sort(
    columns: &[ColumnDescriptor],
    key: &str,
) -> Option<(Vec<ColumnDescriptor>, SortRequest)> {
    let clicked = columns.iter().find(|c| c.key == key)?;
    let descending = if clicked.sort.is_sorted {
        !clicked.sort.descending
    } else {
        false
    };
    let request = SortRequest {
        field_alias: clicked.field_alias.clone(),
        descending,
    };

    let columns = columns
        .iter()
        .map(|c| {
            if c.key == key {
                c.with_sort(SortState::sorted(descending))
            } else {
                c.with_sort(SortState::default())
            }
        })
        .collect();
    Some((columns, request))
}
