//! Proportional column width distribution.
//!
//! The viewport width minus a fixed chrome margin is split across columns by
//! their relative weights. Every column but the last gets its rounded share;
//! the last one takes whatever is left, so the shares always add up to the
//! full budget.

use log::{trace, warn};

use crate::config::GridConfig;
use crate::dataset::DataSetColumn;

/// Margin and floor used by [`distribute_width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthPolicy {
    /// Width reserved for non-column chrome.
    pub margin: u32,
    /// Smallest width any column may receive.
    pub min_width: u32,
}

impl Default for WidthPolicy {
    fn default() -> Self {
        Self {
            margin: 250,
            min_width: 5,
        }
    }
}

impl From<&GridConfig> for WidthPolicy {
    fn from(config: &GridConfig) -> Self {
        Self {
            margin: config.width_margin,
            min_width: config.min_column_width,
        }
    }
}

/// Allocated width per column alias, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidthAllocation {
    widths: Vec<(String, u32)>,
}

impl WidthAllocation {
    /// Returns the width allocated to an alias.
    pub fn get(&self, alias: &str) -> Option<u32> {
        self.widths
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, w)| *w)
    }

    /// Sum of all allocations.
    pub fn total(&self) -> u64 {
        self.widths.iter().map(|(_, w)| *w as u64).sum()
    }

    /// Number of allocated columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Returns `true` if nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Iterates `(alias, width)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.widths.iter().map(|(a, w)| (a.as_str(), *w))
    }

    /// Widths in schema order.
    pub fn widths(&self) -> Vec<u32> {
        self.widths.iter().map(|(_, w)| *w).collect()
    }
}

/// Splits `viewport_width` (minus the policy margin) across `columns`.
///
/// When the budget covers every column's floor, the allocations add up to
/// exactly `viewport_width - margin`. Degenerate inputs never produce
/// negative or NaN widths:
///
/// - zero (or non-finite) total weight splits the budget evenly,
/// - a budget smaller than `columns * min_width` gives every column the floor.
///
/// # Example
///
/// ```
/// use gridtab_lib::dataset::DataSetColumn;
/// use gridtab_lib::width::{distribute_width, WidthPolicy};
///
/// let columns = vec![
///     DataSetColumn::new("name", "Name", "SingleLine.Text", 2.0),
///     DataSetColumn::new("city", "City", "SingleLine.Text", 1.0),
///     DataSetColumn::new("phone", "Phone", "SingleLine.Phone", 1.0),
/// ];
/// let allocation = distribute_width(&columns, 650, &WidthPolicy::default());
/// assert_eq!(allocation.widths(), vec![200, 100, 100]);
/// ```
pub fn distribute_width(
    columns: &[DataSetColumn],
    viewport_width: i64,
    policy: &WidthPolicy,
) -> WidthAllocation {
    let Some(last) = columns.len().checked_sub(1) else {
        return WidthAllocation::default();
    };

    let count = columns.len() as i64;
    let min = policy.min_width as i64;
    let total_width = viewport_width.saturating_sub(policy.margin as i64);

    let weights: Vec<f64> = columns
        .iter()
        .map(|c| {
            if c.visual_size_factor.is_finite() && c.visual_size_factor > 0.0 {
                c.visual_size_factor
            } else {
                0.0
            }
        })
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    let widths: Vec<i64> = if total_width < count.saturating_mul(min) {
        warn!(
            "Width budget {} too small for {} columns, using floor width {}",
            total_width, count, min
        );
        vec![min; columns.len()]
    } else if weight_sum <= 0.0 || !weight_sum.is_finite() {
        warn!("Columns carry no usable width weight, splitting {} evenly", total_width);
        let share = total_width / count;
        let mut widths = vec![share; columns.len()];
        widths[last] = total_width - share * (count - 1);
        widths
    } else {
        proportional(&weights, weight_sum, total_width, min)
    };

    let allocation = WidthAllocation {
        widths: columns
            .iter()
            .zip(widths)
            .map(|(c, w)| (c.alias.clone(), w.clamp(0, u32::MAX as i64) as u32))
            .collect(),
    };
    trace!(
        "Distributed {} across {} columns: {:?}",
        total_width,
        allocation.len(),
        allocation.widths()
    );
    allocation
}

fn proportional(weights: &[f64], weight_sum: f64, total_width: i64, min: i64) -> Vec<i64> {
    let last = weights.len() - 1;
    let mut widths = Vec::with_capacity(weights.len());
    let mut remaining = total_width;

    for weight in &weights[..last] {
        let cell = ((weight / weight_sum) * total_width as f64).round() as i64;
        let cell = cell.max(min);
        remaining -= cell;
        widths.push(cell);
    }
    widths.push(remaining);

    // Floors on earlier columns can eat into the last one; hand the deficit
    // back from the widest columns.
    let mut deficit = min - widths[last];
    if deficit > 0 {
        widths[last] = min;
        while deficit > 0 {
            let Some((widest, width)) = widths[..last]
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, w)| *w > min)
                .max_by_key(|(_, w)| *w)
            else {
                break;
            };
            let take = deficit.min(width - min);
            widths[widest] -= take;
            deficit -= take;
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(weights: &[f64]) -> Vec<DataSetColumn> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| DataSetColumn::new(format!("col{i}"), format!("Col {i}"), "SingleLine.Text", *w))
            .collect()
    }

    #[test]
    fn test_last_column_absorbs_rounding() {
        let allocation = distribute_width(&columns(&[1.0, 1.0, 1.0]), 350, &WidthPolicy::default());
        // 100 / 3 = 33.33 -> 33, 33, remainder 34
        assert_eq!(allocation.widths(), vec![33, 33, 34]);
        assert_eq!(allocation.total(), 100);
    }

    #[test]
    fn test_lookup_by_alias() {
        let allocation = distribute_width(&columns(&[3.0, 1.0]), 650, &WidthPolicy::default());
        assert_eq!(allocation.get("col0"), Some(300));
        assert_eq!(allocation.get("col1"), Some(100));
        assert_eq!(allocation.get("nope"), None);
    }

    #[test]
    fn test_empty_schema() {
        let allocation = distribute_width(&[], 1000, &WidthPolicy::default());
        assert!(allocation.is_empty());
    }

    #[test]
    fn test_tiny_weight_is_floored_and_sum_kept() {
        let allocation = distribute_width(&columns(&[1000.0, 1.0, 1000.0]), 650, &WidthPolicy::default());
        let widths = allocation.widths();
        assert!(widths.iter().all(|w| *w >= 5));
        assert_eq!(allocation.total(), 400);
    }

    #[test]
    fn test_floor_deficit_taken_from_widest() {
        // Earlier columns round to 0 and get floored; the last would go below the floor.
        let allocation = distribute_width(&columns(&[1.0, 1.0, 1.0, 0.0]), 270, &WidthPolicy::default());
        let widths = allocation.widths();
        assert_eq!(allocation.total(), 20);
        assert!(widths.iter().all(|w| *w >= 5));
    }

    #[test]
    fn test_extreme_viewports_do_not_overflow() {
        let cols = columns(&[2.0, 1.0, 1.0]);
        let allocation = distribute_width(&cols, i64::MIN, &WidthPolicy::default());
        assert_eq!(allocation.widths(), vec![5, 5, 5]);

        let allocation = distribute_width(&cols, i64::MAX, &WidthPolicy::default());
        assert_eq!(allocation.len(), 3);
        assert!(allocation.widths().iter().all(|w| *w >= 5));
    }
}
