//! Option set value types

use serde::Deserialize;
use serde::Serialize;

/// A single option set (choice, state or status) value.
///
/// The numeric value is what the host stores; the label is the localized
/// display text. Category tabs compare on the value and display the label.
///
/// # Example
///
/// ```
/// use gridtab_lib::model::types::OptionSetValue;
///
/// let status = OptionSetValue::with_label(1, "Active");
/// assert_eq!(status.value, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSetValue {
    /// The numeric value of the option.
    pub value: i32,
    /// The display label, if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl OptionSetValue {
    /// Creates a new option set value.
    pub fn new(value: i32) -> Self {
        Self { value, label: None }
    }

    /// Creates a new option set value with a label.
    pub fn with_label(value: i32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

impl From<i32> for OptionSetValue {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

/// A multi-select option set value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiSelectOptionSetValue {
    /// The numeric values of the selected options.
    pub values: Vec<i32>,
    /// The display labels, positionally matching `values`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl MultiSelectOptionSetValue {
    /// Creates a new multi-select option set value.
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            labels: None,
        }
    }

    /// Creates a new multi-select option set value with labels.
    pub fn with_labels(values_and_labels: Vec<(i32, impl Into<String>)>) -> Self {
        let (values, labels): (Vec<_>, Vec<_>) = values_and_labels
            .into_iter()
            .map(|(v, l)| (v, l.into()))
            .unzip();
        Self {
            values,
            labels: Some(labels),
        }
    }

    /// Returns `true` if no options are selected.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of selected options.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl From<Vec<i32>> for MultiSelectOptionSetValue {
    fn from(values: Vec<i32>) -> Self {
        Self::new(values)
    }
}
