//! Tests for client-side sorting.

use gridtab_lib::locale::Collator;
use gridtab_lib::rows::RowItem;
use gridtab_lib::sort::sort_rows;

fn rows(values: &[&str]) -> Vec<RowItem> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| RowItem::new(format!("k{i}"), "statuscode").with_value("v", *v))
        .collect()
}

fn values(rows: &[RowItem]) -> Vec<&str> {
    rows.iter().map(|r| r.value("v").unwrap_or("")).collect()
}

fn keys(rows: &[RowItem]) -> Vec<String> {
    rows.iter().map(|r| r.key().to_string()).collect()
}

#[test]
fn test_numeric_aware_ascending() {
    let sorted = sort_rows(&rows(&["10", "2", "1"]), "v", false, &Collator::new("en"));
    assert_eq!(values(&sorted), vec!["1", "2", "10"]);
}

#[test]
fn test_mixed_text() {
    let sorted = sort_rows(
        &rows(&["Case 10", "case 9", "Ärende", "apple", "Case 9", ""]),
        "v",
        false,
        &Collator::new("en"),
    );
    assert_eq!(
        values(&sorted),
        vec!["", "apple", "Ärende", "case 9", "Case 9", "Case 10"]
    );
}

#[test]
fn test_descending_is_exact_reverse() {
    let data = rows(&["b", "a", "B", "a", "10", "9", "", "a"]);
    let collator = Collator::new("en");
    let asc = sort_rows(&data, "v", false, &collator);
    let desc = sort_rows(&asc, "v", true, &collator);

    let mut reversed = keys(&asc);
    reversed.reverse();
    assert_eq!(keys(&desc), reversed);
}

#[test]
fn test_sorting_is_idempotent() {
    let data = rows(&["x", "y", "x", "X", "1", "01", "z"]);
    let collator = Collator::new("en");
    for descending in [false, true] {
        let once = sort_rows(&data, "v", descending, &collator);
        let twice = sort_rows(&once, "v", descending, &collator);
        assert_eq!(keys(&once), keys(&twice));
    }
}

#[test]
fn test_sorting_is_deterministic_across_input_orders() {
    let collator = Collator::new("en");
    let data = rows(&["pear", "apple", "fig", "apple"]);
    let mut shuffled = data.clone();
    shuffled.reverse();
    assert_eq!(
        keys(&sort_rows(&data, "v", false, &collator)),
        keys(&sort_rows(&shuffled, "v", false, &collator))
    );
}

#[test]
fn test_swedish_collation() {
    let data = rows(&["Örebro", "Zürich", "Åre", "Arboga"]);
    let sorted = sort_rows(&data, "v", false, &Collator::new("sv"));
    assert_eq!(values(&sorted), vec!["Arboga", "Zürich", "Åre", "Örebro"]);
}
