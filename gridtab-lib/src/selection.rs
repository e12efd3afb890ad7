//! Row selection and its synchronization with the data source.
//!
//! [`Selection`] is the presentation-side state the rendering toolkit
//! mutates. [`SelectionHandle`] scopes one selection to one data source
//! snapshot and pushes the selected keys to that source on every change.

use std::collections::HashSet;

use log::{debug, trace};
use serde::Deserialize;
use serde::Serialize;

use crate::dataset::{DataSet, DataSetId};

/// Selection mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed
    None,
    /// Single item selection
    Single,
    /// Multiple items can be selected (Ctrl+click, Shift+range)
    #[default]
    Multiple,
}

/// Key-based selection over an ordered item list.
///
/// Keys stay stable across refreshes: when the item list changes, selected
/// keys that are still present stay selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    /// Item keys in display order.
    items: Vec<String>,
    /// Currently selected keys
    selected: HashSet<String>,
    /// Anchor for range selection (Shift+click starting point)
    anchor: Option<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Replaces the item list. Returns `true` if selected keys were dropped.
    pub fn set_items(&mut self, items: Vec<String>) -> bool {
        let present: HashSet<&str> = items.iter().map(|k| k.as_str()).collect();
        let before = self.selected.len();
        self.selected.retain(|k| present.contains(k.as_str()));
        if self
            .anchor
            .as_deref()
            .is_some_and(|a| !present.contains(a))
        {
            self.anchor = None;
        }
        self.items = items;
        self.selected.len() != before
    }

    /// Item keys in display order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Selected keys, in item order.
    pub fn selected_keys(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|k| self.selected.contains(k.as_str()))
            .cloned()
            .collect()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get the anchor key for range selection.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Clear all selection. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        self.anchor = None;
        changed
    }

    /// Select a single key, clearing others. Returns `true` on change.
    pub fn select(&mut self, key: &str) -> bool {
        if self.mode == SelectionMode::None || !self.contains_item(key) {
            return false;
        }
        let changed = self.selected.len() != 1 || !self.selected.contains(key);
        self.selected.clear();
        self.selected.insert(key.to_string());
        self.anchor = Some(key.to_string());
        changed
    }

    /// Toggle one key (Ctrl+click). Returns `true` on change.
    ///
    /// In single mode selecting a key replaces the previous one.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.mode == SelectionMode::None || !self.contains_item(key) {
            return false;
        }
        if self.selected.remove(key) {
            self.anchor = Some(key.to_string());
            return true;
        }
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.insert(key.to_string());
        self.anchor = Some(key.to_string());
        true
    }

    /// Range select from the anchor to `target` (Shift+click).
    ///
    /// If `extend` is false, keys outside the range are deselected first.
    /// Falls back to [`select`](Self::select) in single mode or without a
    /// usable anchor. Returns `true` on change.
    pub fn range_select(&mut self, target: &str, extend: bool) -> bool {
        if self.mode != SelectionMode::Multiple {
            return self.select(target);
        }
        let anchor = self.anchor.clone().unwrap_or_else(|| target.to_string());
        let anchor_pos = self.items.iter().position(|k| *k == anchor);
        let target_pos = self.items.iter().position(|k| k == target);

        let (start, end) = match (anchor_pos, target_pos) {
            (Some(a), Some(t)) => (a.min(t), a.max(t)),
            _ => return self.select(target),
        };

        let range: HashSet<String> = self.items[start..=end].iter().cloned().collect();
        let before = self.selected.clone();
        if !extend {
            self.selected.retain(|k| range.contains(k));
        }
        self.selected.extend(range);
        self.selected != before
    }

    /// Select every item. Returns `true` on change.
    pub fn select_all(&mut self) -> bool {
        match self.mode {
            SelectionMode::Multiple => {
                let before = self.selected.len();
                self.selected.extend(self.items.iter().cloned());
                self.selected.len() != before
            }
            _ => false,
        }
    }

    fn contains_item(&self, key: &str) -> bool {
        self.items.iter().any(|k| k == key)
    }
}

/// A selection bound to one data source snapshot.
///
/// Created when the grid first sees a data source and replaced (never
/// reused) when the source's identity changes, so a handle never pushes
/// keys into a source it was not created for.
#[derive(Debug, Clone)]
pub struct SelectionHandle {
    scope: DataSetId,
    selection: Selection,
    pushed: Vec<String>,
}

impl SelectionHandle {
    /// Creates an empty handle scoped to `scope`.
    pub fn new(scope: DataSetId, mode: SelectionMode) -> Self {
        debug!("New selection handle for {}", scope);
        Self {
            scope,
            selection: Selection::new(mode),
            pushed: Vec::new(),
        }
    }

    /// The data source snapshot this handle belongs to.
    pub fn scope(&self) -> DataSetId {
        self.scope
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable access for the rendering toolkit's selection gestures.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Keys pushed by the last [`sync`](Self::sync).
    pub fn last_pushed(&self) -> &[String] {
        &self.pushed
    }

    /// Pushes the current selected keys to `data`.
    ///
    /// The pushed list is rebuilt from the selection every time, so repeated
    /// calls without a selection change push the same list. Returns `false`
    /// without pushing if `data` is not this handle's snapshot.
    pub fn sync(&mut self, data: &mut dyn DataSet) -> bool {
        if data.id() != self.scope {
            debug!(
                "Selection handle for {} ignores sync into {}",
                self.scope,
                data.id()
            );
            return false;
        }
        self.pushed = self.selection.selected_keys();
        trace!("Pushing {} selected ids to {}", self.pushed.len(), self.scope);
        data.set_selected_record_ids(&self.pushed);
        true
    }
}
