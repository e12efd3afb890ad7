//! The grid engine: composes the projection stages and reacts to host events.
//!
//! Each handler recomputes only the stages its event affects, in dependency
//! order (schema, rows, sort, categories, filter). The selected category,
//! the selection handle and the active sort are the only state carried from
//! one event to the next.

use log::{debug, info};
use serde::Serialize;

use crate::category::{self, CategoryTab};
use crate::config::GridConfig;
use crate::dataset::{DataSet, DataSetColumn};
use crate::error::GridError;
use crate::locale::{Collator, language_from_lcid, language_from_tag};
use crate::render::{RenderedCell, render_row};
use crate::rows::{self, RowItem};
use crate::schema::{self, ColumnDescriptor};
use crate::selection::{Selection, SelectionHandle};
use crate::sort::{self, SortRequest};
use crate::width::{self, WidthAllocation, WidthPolicy};

/// Result of [`GridEngine::on_data_refreshed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The source is still loading; nothing was recomputed.
    Loading,
    /// Rows were re-projected against the existing column set.
    Rows,
    /// The column set changed and was remapped before projecting rows.
    Schema,
}

/// Everything the rendering toolkit needs to draw the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub columns: Vec<ColumnDescriptor>,
    /// Rows of the active category, in display order.
    pub items: Vec<RowItem>,
    pub categories: Vec<CategoryTab>,
    pub selected_category: Option<String>,
    /// Number of rows shown.
    pub record_count: usize,
    pub selected_count: usize,
    /// Footer text, e.g. `Records: 3 (1 selected)`.
    pub footer: String,
}

impl GridView {
    /// Renders every shown row.
    pub fn cells(&self) -> Vec<Vec<RenderedCell>> {
        self.items
            .iter()
            .map(|row| render_row(&self.columns, row))
            .collect()
    }
}

/// Data-bound grid state.
///
/// # Example
///
/// ```
/// use gridtab_lib::config::GridConfig;
/// use gridtab_lib::dataset::{DataSetColumn, DataSetId, InMemoryDataSet};
/// use gridtab_lib::grid::GridEngine;
/// use gridtab_lib::model::Record;
/// use gridtab_lib::model::types::OptionSetValue;
/// use uuid::Uuid;
///
/// let mut data = InMemoryDataSet::new(DataSetId(1))
///     .with_column(DataSetColumn::new("title", "Title", "SingleLine.Text", 1.0).primary())
///     .with_record(
///         Record::new("incident", Uuid::from_u128(1))
///             .set("title", "Broken printer")
///             .set_with_formatted("statuscode", OptionSetValue::new(1), "In Progress"),
///     );
///
/// let mut grid = GridEngine::new(GridConfig::default(), "en");
/// grid.on_viewport_resized(650);
/// grid.on_data_refreshed(&mut data);
///
/// let view = grid.view();
/// assert_eq!(view.categories[0].label, "In Progress");
/// assert_eq!(view.columns[0].computed_max_width, 400);
/// assert_eq!(view.footer, "Records: 1 (0 selected)");
/// ```
#[derive(Debug, Clone)]
pub struct GridEngine {
    config: GridConfig,
    policy: WidthPolicy,
    collator: Collator,
    viewport_width: Option<i64>,
    schema: Vec<DataSetColumn>,
    allocation: WidthAllocation,
    columns: Vec<ColumnDescriptor>,
    /// Projected rows, unfiltered, in display order.
    rows: Vec<RowItem>,
    categories: Vec<CategoryTab>,
    selected_category: Option<String>,
    active_sort: Option<SortRequest>,
    selection: Option<SelectionHandle>,
    /// Category field change requested while the source was loading.
    pending_category_field: Option<String>,
    generation: u64,
}

impl GridEngine {
    /// Creates an engine sorting with the given two-letter language.
    pub fn new(config: GridConfig, language: &str) -> Self {
        let language = language_from_tag(language, &config.fallback_language);
        Self {
            policy: WidthPolicy::from(&config),
            collator: Collator::new(language),
            config,
            viewport_width: None,
            schema: Vec::new(),
            allocation: WidthAllocation::default(),
            columns: Vec::new(),
            rows: Vec::new(),
            categories: Vec::new(),
            selected_category: None,
            active_sort: None,
            selection: None,
            pending_category_field: None,
            generation: 0,
        }
    }

    /// Creates an engine for the user's numeric language id.
    pub fn with_lcid(config: GridConfig, lcid: i32) -> Self {
        let language = language_from_lcid(lcid, &config.fallback_language);
        Self::new(config, &language)
    }

    /// Creates an engine after validating `config`.
    pub fn try_new(config: GridConfig, language: &str) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self::new(config, language))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn collator(&self) -> &Collator {
        &self.collator
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// All projected rows, ignoring the category filter.
    pub fn rows(&self) -> &[RowItem] {
        &self.rows
    }

    pub fn categories(&self) -> &[CategoryTab] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn active_sort(&self) -> Option<&SortRequest> {
        self.active_sort.as_ref()
    }

    pub fn allocation(&self) -> &WidthAllocation {
        &self.allocation
    }

    /// Number of data refreshes handled so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selection_handle(&self) -> Option<&SelectionHandle> {
        self.selection.as_ref()
    }

    /// The selection the rendering toolkit mutates, once data has arrived.
    pub fn selection_mut(&mut self) -> Option<&mut Selection> {
        self.selection.as_mut().map(|h| h.selection_mut())
    }

    pub fn selected_count(&self) -> usize {
        self.selection.as_ref().map_or(0, |h| h.selected_count())
    }

    /// `true` once the source finished loading and knows its total count.
    pub fn is_data_loaded(data: &dyn DataSet) -> bool {
        !data.loading() && data.paging().is_count_known()
    }

    // -------------------------------------------------------------------------
    // Event handlers
    // -------------------------------------------------------------------------

    /// The data source delivered a new page or schema.
    pub fn on_data_refreshed(&mut self, data: &mut dyn DataSet) -> RefreshOutcome {
        if data.loading() {
            debug!("Data set {} still loading, skipping refresh", data.id());
            return RefreshOutcome::Loading;
        }
        self.generation += 1;

        if let Some(field) = self.pending_category_field.take() {
            self.apply_category_field(field);
        }

        let schema_changed =
            schema::schema_signature(data.columns()) != schema::schema_signature(&self.schema);
        if schema_changed {
            self.remap_schema(data);
        }

        self.reproject(&*data);
        self.rescope_selection(data);

        debug!(
            "Refresh #{} of {}: {} rows, {} categories",
            self.generation,
            data.id(),
            self.rows.len(),
            self.categories.len()
        );
        if schema_changed {
            RefreshOutcome::Schema
        } else {
            RefreshOutcome::Rows
        }
    }

    /// The host resized the control. Returns `true` if widths changed.
    pub fn on_viewport_resized(&mut self, width: i64) -> bool {
        if self.viewport_width == Some(width) {
            return false;
        }
        debug!("Viewport resized to {}", width);
        self.viewport_width = Some(width);
        self.allocation = width::distribute_width(&self.schema, width, &self.policy);
        self.columns = schema::apply_allocation(&self.columns, &self.allocation);
        true
    }

    /// A column header was clicked. Returns `false` for unknown keys.
    pub fn on_column_header_click(&mut self, key: &str) -> bool {
        let Some((columns, request)) = sort::toggle_sort(&self.columns, key) else {
            debug!("Header click on unknown column '{}'", key);
            return false;
        };
        debug!(
            "Sorting by '{}' {}",
            request.field_alias,
            if request.descending { "descending" } else { "ascending" }
        );
        self.rows = sort::sort_rows(
            &self.rows,
            &request.field_alias,
            request.descending,
            &self.collator,
        );
        self.columns = columns;
        self.active_sort = Some(request);
        true
    }

    /// A category tab was clicked. Returns `false` if no such tab exists.
    pub fn on_category_selected(&mut self, value: &str) -> bool {
        if !self.categories.iter().any(|t| t.value == value) {
            debug!("Ignoring selection of unknown category '{}'", value);
            return false;
        }
        self.selected_category = Some(value.to_string());
        true
    }

    /// The designated category field changed; rows and tabs are rebuilt.
    ///
    /// While `data` is loading the change is held back and applied by the
    /// next completed refresh, so rows and tabs never mix two fields.
    pub fn on_category_field_changed(&mut self, field: &str, data: &mut dyn DataSet) {
        if data.loading() {
            debug!("Data set {} loading, deferring category field '{}'", data.id(), field);
            self.pending_category_field = Some(field.to_string());
            return;
        }
        self.pending_category_field = None;
        if self.config.category_field == field {
            return;
        }
        self.apply_category_field(field.to_string());
        self.on_data_refreshed(data);
    }

    /// The rendering toolkit changed the row selection.
    ///
    /// Pushes the selected keys to `data` and returns the selected count.
    pub fn on_selection_changed(&mut self, data: &mut dyn DataSet) -> usize {
        match self.selection.as_mut() {
            Some(handle) => {
                handle.sync(data);
                handle.selected_count()
            }
            None => 0,
        }
    }

    /// Opens the record behind a link cell.
    pub fn open_record(
        &self,
        row_key: &str,
        field_alias: &str,
        data: &mut dyn DataSet,
    ) -> Result<(), GridError> {
        let row = self
            .rows
            .iter()
            .find(|r| r.key() == row_key)
            .ok_or_else(|| GridError::UnknownRow(row_key.to_string()))?;
        if !self.columns.iter().any(|c| c.field_alias == field_alias) {
            return Err(GridError::UnknownColumn(field_alias.to_string()));
        }
        let reference = row
            .reference(field_alias)
            .ok_or_else(|| GridError::NotNavigable {
                row: row_key.to_string(),
                alias: field_alias.to_string(),
            })?;
        debug!("Opening {} {}", reference.logical_name, reference.id);
        data.open_record(reference);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Rows of the active category.
    pub fn filtered_rows(&self) -> Vec<RowItem> {
        category::filter_by_category(
            &self.rows,
            &self.config.category_field,
            self.selected_category.as_deref(),
        )
    }

    /// Snapshot for the rendering toolkit.
    pub fn view(&self) -> GridView {
        let items = self.filtered_rows();
        let selected_count = self.selected_count();
        GridView {
            footer: format!("Records: {} ({} selected)", items.len(), selected_count),
            record_count: items.len(),
            columns: self.columns.clone(),
            items,
            categories: self.categories.clone(),
            selected_category: self.selected_category.clone(),
            selected_count,
        }
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    fn apply_category_field(&mut self, field: String) {
        if self.config.category_field == field {
            return;
        }
        info!("Category field changed to '{}'", field);
        self.config.category_field = field;
        // Values of the old field mean nothing for the new one.
        self.selected_category = None;
    }

    fn remap_schema(&mut self, data: &dyn DataSet) {
        info!("Column set of {} changed, remapping", data.id());
        self.schema = data.columns().to_vec();
        self.allocation = match self.viewport_width {
            Some(width) => width::distribute_width(&self.schema, width, &self.policy),
            None => WidthAllocation::default(),
        };
        self.columns =
            schema::map_schema(&self.schema, &self.allocation, data.sorting(), &self.policy);
        self.active_sort = None;
    }

    fn reproject(&mut self, data: &dyn DataSet) {
        let field = self.config.category_field.clone();
        let rows = rows::project_data_set(&self.columns, data, &field);

        // Tabs follow the source's order, not the client-side sort.
        self.categories = category::derive_categories(&rows, &field);
        self.selected_category =
            category::select_default(&self.categories, self.selected_category.as_deref());

        self.rows = match &self.active_sort {
            Some(request) => sort::sort_rows(
                &rows,
                &request.field_alias,
                request.descending,
                &self.collator,
            ),
            None => rows,
        };
    }

    fn rescope_selection(&mut self, data: &mut dyn DataSet) {
        let keys: Vec<String> = self.rows.iter().map(|r| r.key().to_string()).collect();
        match self.selection.as_mut() {
            Some(handle) if handle.scope() == data.id() => {
                if handle.selection_mut().set_items(keys) {
                    debug!("Refresh dropped selected rows, resyncing");
                    handle.sync(data);
                }
            }
            _ => {
                let mut handle = SelectionHandle::new(data.id(), self.config.selection_mode);
                handle.selection_mut().set_items(keys);
                self.selection = Some(handle);
            }
        }
    }
}
