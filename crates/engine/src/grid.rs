//! Grid state facade.
//!
//! Composes the column layout, sort engine, grouping engine and selection
//! state behind the single mutation surface the presentation layer uses.
//! Every operation is synchronous and leaves the aggregate fully
//! consistent before returning; derived views (sorted list, grouped tree,
//! column splits) are pure functions of the current state, recomputed on
//! demand.

use rustc_hash::FxHashSet;
use trellis_core::value::parse_date;
use trellis_core::{ColumnSpec, DataType, FixedSide, Record, SortDirection, Value};

use crate::column::{ColumnLayout, ResizeSession, DEFAULT_RESIZE_WIDTH};
use crate::group::{build_hierarchy, GroupNode, Grouping};
use crate::sort::{SortSpec, SortUpdate};
use crate::source::{LoadError, RecordSource};

/// Field that carries record identity and the select-all indicator.
const ID_FIELD: &str = "id";

/// The aggregate grid state.
pub struct GridState {
    columns: ColumnLayout,
    sort: SortSpec,
    grouping: Grouping,
    records: Vec<Record>,
    /// Snapshot taken at load time, restored by [`GridState::reset`].
    original: Vec<Record>,
    menu_open: bool,
    resize: Option<ResizeSession>,
}

impl GridState {
    /// Start with a column configuration and no records.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        GridState {
            columns: ColumnLayout::new(columns),
            sort: SortSpec::default(),
            grouping: Grouping::default(),
            records: Vec::new(),
            original: Vec::new(),
            menu_open: false,
            resize: None,
        }
    }

    // ------------------------------------------------------------------
    // Loading and lifecycle
    // ------------------------------------------------------------------

    /// Replace the record collection and remember it as the reset
    /// snapshot. Date-typed fields still carried as text are normalized
    /// here, once, at the load boundary.
    pub fn load_records(&mut self, mut records: Vec<Record>) {
        self.normalize_dates(&mut records);
        self.original = records.clone();
        self.records = records;
    }

    /// Fetch from an external source. On error the engine keeps its
    /// pre-load state; an empty result is a distinct failure. Readers
    /// observe either the old state or the fully loaded one.
    pub fn load_from(&mut self, source: &dyn RecordSource) -> Result<usize, LoadError> {
        let records = source.fetch()?;
        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        let count = records.len();
        self.load_records(records);
        Ok(count)
    }

    fn normalize_dates(&self, records: &mut [Record]) {
        let date_fields: Vec<&str> = self
            .columns
            .columns()
            .iter()
            .filter(|c| c.data_type == DataType::Date)
            .map(|c| c.field.as_str())
            .collect();

        for record in records {
            for field in &date_fields {
                if let Some(value) = record.get_mut(field) {
                    if let Value::Text(text) = value {
                        if let Some(date) = parse_date(text) {
                            *value = Value::Date(date);
                        }
                    }
                }
            }
        }
    }

    /// Restore the original records and clear sort, grouping and
    /// expansion state. Columns return to visible/ungrouped defaults;
    /// fixed sides and widths are preserved.
    pub fn reset(&mut self) {
        self.records = self.original.clone();
        self.sort.clear();
        self.grouping.clear();
        self.grouping.collapse_all();
        for col in self.columns_mut() {
            col.visible = true;
            col.grouped_by = false;
            col.sorted_by = None;
        }
    }

    fn columns_mut(&mut self) -> impl Iterator<Item = &mut ColumnSpec> {
        self.columns.columns_mut()
    }

    // ------------------------------------------------------------------
    // Column layout operations
    // ------------------------------------------------------------------

    pub fn reorder_columns(&mut self, from: usize, to: usize) {
        self.columns.reorder(from, to);
    }

    pub fn resize_column(&mut self, field: &str, width: u32) {
        self.columns.resize(field, width);
    }

    pub fn fix_column(&mut self, field: &str, side: FixedSide) {
        self.menu_open = false;
        self.columns.fix(field, side);
    }

    pub fn unfix_column(&mut self, field: &str) {
        self.menu_open = false;
        self.columns.unfix(field);
    }

    pub fn unfix_all_columns(&mut self) {
        self.menu_open = false;
        self.columns.unfix_all();
    }

    pub fn set_visibility(&mut self, fields: &FxHashSet<String>) {
        self.columns.set_visible_fields(fields);
    }

    pub fn hide_column(&mut self, field: &str) {
        self.menu_open = false;
        self.columns.hide(field);
    }

    // ------------------------------------------------------------------
    // Resize drag session
    // ------------------------------------------------------------------

    /// Begin a resize drag on `field` at pointer position `pointer_x`.
    /// Unknown fields are ignored.
    pub fn begin_resize(&mut self, field: &str, pointer_x: i32) {
        let Some(col) = self.columns.get(field) else {
            return;
        };
        let start_width = col.width.unwrap_or(DEFAULT_RESIZE_WIDTH);
        self.resize = Some(ResizeSession::new(field, pointer_x, start_width));
    }

    /// Recompute the dragged column's width from the captured start state
    /// and the current pointer position. No-op without an active session.
    pub fn update_resize(&mut self, pointer_x: i32) {
        if let Some(session) = self.resize.clone() {
            let width = session.width_at(pointer_x);
            self.columns.resize(session.field(), width);
        }
    }

    pub fn end_resize(&mut self) {
        self.resize = None;
    }

    pub fn resize_session(&self) -> Option<&ResizeSession> {
        self.resize.as_ref()
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Apply a sort on `field`. The column remembers the direction (its
    /// `sorted_by` preference) regardless of the update mode. Unknown
    /// fields are ignored.
    pub fn apply_sort(&mut self, field: &str, direction: SortDirection, update: SortUpdate) {
        self.menu_open = false;
        let Some(col) = self.columns.get_mut(field) else {
            return;
        };
        col.sorted_by = Some(direction);
        let data_type = col.data_type;
        self.sort.apply(field, direction, data_type, update);
    }

    pub fn sort_index(&self, field: &str) -> Option<usize> {
        self.sort.index_of(field)
    }

    pub fn sort_direction(&self, field: &str) -> Option<SortDirection> {
        self.sort.direction_of(field)
    }

    // ------------------------------------------------------------------
    // Grouping
    // ------------------------------------------------------------------

    /// Replace the grouping field list (order = nesting depth). Column
    /// `grouped_by` flags are synced; the sort chain is left alone.
    pub fn set_grouping(&mut self, fields: Vec<String>) {
        self.grouping.set_fields(fields);
        let grouped: Vec<String> = self.grouping.fields().to_vec();
        for col in self.columns_mut() {
            col.grouped_by = grouped.contains(&col.field);
        }
    }

    /// Group by `field` (innermost level). Grouping a column re-applies
    /// its remembered sort preference, or ascending, as the single sort
    /// rule, so group order is deterministic. Unknown fields are ignored.
    pub fn add_grouping(&mut self, field: &str) {
        self.menu_open = false;
        let Some(col) = self.columns.get_mut(field) else {
            return;
        };
        col.grouped_by = true;
        let direction = col.sorted_by.unwrap_or(SortDirection::Asc);
        if self.grouping.add_field(field) {
            self.apply_sort(field, direction, SortUpdate::Replace);
        }
    }

    pub fn remove_grouping(&mut self, field: &str) {
        self.menu_open = false;
        if let Some(col) = self.columns.get_mut(field) {
            col.grouped_by = false;
        }
        self.grouping.remove_field(field);
    }

    pub fn clear_grouping(&mut self) {
        self.menu_open = false;
        for col in self.columns_mut() {
            col.grouped_by = false;
        }
        self.grouping.clear();
    }

    pub fn is_grouped(&self) -> bool {
        self.grouping.is_active()
    }

    pub fn toggle_group(&mut self, path: &str) {
        self.grouping.toggle(path);
    }

    /// Expand every group present in the current hierarchy. Paths that no
    /// longer exist are dropped.
    pub fn expand_all(&mut self) {
        let tree = self.grouped_view();
        self.grouping.expand_all(&tree);
    }

    pub fn collapse_all(&mut self) {
        self.grouping.collapse_all();
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.grouping.is_expanded(path)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select or deselect every record, and mirror the flag on the
    /// identity column's header indicator.
    pub fn select_all(&mut self, flag: bool) {
        for record in &mut self.records {
            record.selected = flag;
        }
        if let Some(col) = self.columns.get_mut(ID_FIELD) {
            col.selected = flag;
        }
    }

    /// Update exactly the record with identity `id`; no match, no effect.
    pub fn select_record(&mut self, id: i64, flag: bool) {
        if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
            record.selected = flag;
        }
    }

    // ------------------------------------------------------------------
    // Menu state
    // ------------------------------------------------------------------

    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    /// Invoked by the presentation layer on outside click or escape.
    pub fn dismiss_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Flat record list under the active sort chain.
    pub fn sorted_records(&self) -> Vec<Record> {
        self.sort.sorted_view(&self.records)
    }

    /// Grouped tree built over the sorted records, so within-group order
    /// reflects the active sort chain.
    pub fn grouped_view(&self) -> Vec<GroupNode> {
        if !self.grouping.is_active() {
            return Vec::new();
        }
        let sorted = self.sorted_records();
        build_hierarchy(
            &sorted,
            self.grouping.fields(),
            0,
            "",
            self.grouping.expanded(),
        )
    }

    /// Visible columns excluding those consumed by grouping (grouped
    /// fields render through the tree, not as flat columns).
    pub fn visible_columns(&self) -> Vec<&ColumnSpec> {
        self.columns
            .columns()
            .iter()
            .filter(|c| c.visible && !self.grouping.fields().contains(&c.field))
            .collect()
    }
}
