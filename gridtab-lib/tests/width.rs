//! Tests for column width distribution.

use gridtab_lib::dataset::DataSetColumn;
use gridtab_lib::width::{WidthPolicy, distribute_width};

fn columns(weights: &[f64]) -> Vec<DataSetColumn> {
    weights
        .iter()
        .enumerate()
        .map(|(i, w)| DataSetColumn::new(format!("c{i}"), format!("C{i}"), "SingleLine.Text", *w))
        .collect()
}

#[test]
fn test_scenario_two_one_one() {
    let allocation = distribute_width(&columns(&[2.0, 1.0, 1.0]), 650, &WidthPolicy::default());
    assert_eq!(allocation.widths(), vec![200, 100, 100]);
}

#[test]
fn test_sum_matches_budget() {
    let weight_sets: &[&[f64]] = &[
        &[1.0],
        &[1.0, 1.0, 1.0],
        &[3.0, 7.0],
        &[100.0, 150.0, 100.0, 75.0, 200.0],
        &[0.3, 0.3, 0.4],
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        &[1000.0, 1.0, 1.0],
    ];
    let viewports = [300, 333, 651, 1024, 1366, 1920, 2561];

    for weights in weight_sets {
        for viewport in viewports {
            let cols = columns(weights);
            let allocation = distribute_width(&cols, viewport, &WidthPolicy::default());
            let budget = (viewport - 250) as u64;
            if budget >= 5 * cols.len() as u64 {
                assert_eq!(
                    allocation.total(),
                    budget,
                    "weights {:?} viewport {}",
                    weights,
                    viewport
                );
            }
            assert!(
                allocation.widths().iter().all(|w| *w >= 5),
                "weights {:?} viewport {}",
                weights,
                viewport
            );
        }
    }
}

#[test]
fn test_non_positive_budget_uses_floor() {
    let cols = columns(&[1.0, 2.0]);
    for viewport in [-1, 0, 100, 250, 255] {
        let allocation = distribute_width(&cols, viewport, &WidthPolicy::default());
        assert_eq!(allocation.widths(), vec![5, 5], "viewport {}", viewport);
    }
}

#[test]
fn test_zero_weights_split_evenly() {
    let allocation = distribute_width(&columns(&[0.0, 0.0, 0.0]), 350, &WidthPolicy::default());
    assert_eq!(allocation.widths(), vec![33, 33, 34]);
}

#[test]
fn test_nan_and_negative_weights() {
    let allocation = distribute_width(
        &columns(&[f64::NAN, -3.0, 2.0]),
        650,
        &WidthPolicy::default(),
    );
    assert_eq!(allocation.total(), 400);
    assert!(allocation.widths().iter().all(|w| *w >= 5));
}

#[test]
fn test_custom_policy() {
    let policy = WidthPolicy {
        margin: 0,
        min_width: 1,
    };
    let allocation = distribute_width(&columns(&[1.0, 1.0]), 3, &policy);
    // 1.5 rounds to 2; the last column takes the remaining 1
    assert_eq!(allocation.widths(), vec![2, 1]);
}
