//! Tests for category derivation, default selection and filtering.

use gridtab_lib::category::{derive_categories, filter_by_category, select_default};
use gridtab_lib::rows::RowItem;

fn rows(raw: &[&str]) -> Vec<RowItem> {
    raw.iter()
        .enumerate()
        .map(|(i, v)| {
            RowItem::new(format!("r{i}"), "statuscode").with_category(*v, v.to_uppercase())
        })
        .collect()
}

#[test]
fn test_scenario_open_closed_pending() {
    let rows = rows(&["open", "open", "closed", "pending", "closed"]);

    let tabs = derive_categories(&rows, "statuscode");
    let values: Vec<&str> = tabs.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["open", "closed", "pending"]);

    let selected = select_default(&tabs, None);
    assert_eq!(selected.as_deref(), Some("open"));

    let closed = filter_by_category(&rows, "statuscode", Some("closed"));
    let keys: Vec<&str> = closed.iter().map(|r| r.key()).collect();
    assert_eq!(keys, vec!["r2", "r4"]);
}

#[test]
fn test_first_label_wins() {
    let rows = vec![
        RowItem::new("1", "statuscode").with_category("5", "Resolved"),
        RowItem::new("2", "statuscode").with_category("5", "Gelöst"),
    ];
    let tabs = derive_categories(&rows, "statuscode");
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].label, "Resolved");
}

#[test]
fn test_derivation_is_deterministic() {
    let rows = rows(&["b", "a", "c", "a", "b", "d"]);
    let first = derive_categories(&rows, "statuscode");
    let second = derive_categories(&rows, "statuscode");
    assert_eq!(first, second);
    let values: Vec<&str> = first.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["b", "a", "c", "d"]);
}

#[test]
fn test_filter_matches_exact_raw_value() {
    let rows = rows(&["1", "10", "1", "01", "2"]);
    for selected in ["1", "10", "01", "2", "3"] {
        let filtered = filter_by_category(&rows, "statuscode", Some(selected));
        let expected: Vec<&str> = rows
            .iter()
            .filter(|r| r.category_for("statuscode").unwrap().raw == selected)
            .map(|r| r.key())
            .collect();
        let actual: Vec<&str> = filtered.iter().map(|r| r.key()).collect();
        assert_eq!(actual, expected, "selected {}", selected);
    }
    assert_eq!(filter_by_category(&rows, "statuscode", None).len(), rows.len());
}

#[test]
fn test_stale_selection_resets_to_first() {
    let before = derive_categories(&rows(&["open", "closed"]), "statuscode");
    assert_eq!(select_default(&before, Some("closed")).as_deref(), Some("closed"));

    let after = derive_categories(&rows(&["pending", "open"]), "statuscode");
    assert_eq!(select_default(&after, Some("closed")).as_deref(), Some("pending"));
}
