//! Column layout model.
//!
//! Owns the ordered descriptor collection and everything derived from it:
//! fixed-side groups, per-column pixel offsets, widths, visibility.
//!
//! Key invariants:
//! - Collection order is display order; reordering preserves all other
//!   relative positions
//! - `fixed_order` is assigned by insertion order into a side (new pins
//!   append, they are never re-inserted at an old slot)
//! - Protected descriptors (`reject_when_unfixed`,
//!   `disable_visibility_toggle`) silently win over any unpin/hide request

use trellis_core::{ColumnSpec, FixedSide};

/// Smallest width a resize can produce, in device-independent units.
pub const MIN_COLUMN_WIDTH: u32 = 50;

/// Width assumed for offset math when a descriptor carries none.
pub const DEFAULT_COLUMN_WIDTH: u32 = 100;

/// Width assumed when a resize drag starts on a descriptor without one.
pub const DEFAULT_RESIZE_WIDTH: u32 = 150;

/// Ordered column descriptor collection plus layout operations.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    columns: Vec<ColumnSpec>,
}

impl ColumnLayout {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        ColumnLayout { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn get(&self, field: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub(crate) fn get_mut(&mut self, field: &str) -> Option<&mut ColumnSpec> {
        self.columns.iter_mut().find(|c| c.field == field)
    }

    pub(crate) fn columns_mut(&mut self) -> impl Iterator<Item = &mut ColumnSpec> {
        self.columns.iter_mut()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Move one descriptor to a new position, preserving every other
    /// relative order. Out-of-range indices are a no-op.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from >= self.columns.len() || to >= self.columns.len() {
            return;
        }
        let column = self.columns.remove(from);
        self.columns.insert(to, column);
    }

    /// Set a column's width, clamped to [`MIN_COLUMN_WIDTH`]. Unknown
    /// fields are ignored.
    pub fn resize(&mut self, field: &str, width: u32) {
        if let Some(col) = self.get_mut(field) {
            col.width = Some(width.max(MIN_COLUMN_WIDTH));
        }
    }

    /// Pin a column to one side. The pin appends to that side's order:
    /// `fixed_order` = number of descriptors already on the side.
    pub fn fix(&mut self, field: &str, side: FixedSide) {
        let order = self
            .columns
            .iter()
            .filter(|c| c.fixed == Some(side))
            .count();
        if let Some(col) = self.get_mut(field) {
            col.fixed = Some(side);
            col.fixed_order = Some(order);
        }
    }

    /// Unpin a column. Descriptors with `reject_when_unfixed` keep their
    /// pin (silent no-op).
    pub fn unfix(&mut self, field: &str) {
        if let Some(col) = self.get_mut(field) {
            if col.reject_when_unfixed {
                return;
            }
            col.fixed = None;
            col.fixed_order = None;
        }
    }

    /// Unpin every column that allows it.
    pub fn unfix_all(&mut self) {
        for col in &mut self.columns {
            if col.reject_when_unfixed {
                continue;
            }
            col.fixed = None;
            col.fixed_order = None;
        }
    }

    /// Show exactly the named fields. Descriptors with
    /// `disable_visibility_toggle` stay visible whether or not the caller
    /// listed them.
    pub fn set_visible_fields(&mut self, fields: &rustc_hash::FxHashSet<String>) {
        for col in &mut self.columns {
            col.visible = col.disable_visibility_toggle || fields.contains(&col.field);
        }
    }

    /// Hide one column, unless its visibility toggle is disabled.
    pub fn hide(&mut self, field: &str) {
        if let Some(col) = self.get_mut(field) {
            if col.disable_visibility_toggle {
                return;
            }
            col.visible = false;
        }
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Columns pinned left, in pin order.
    pub fn left_fixed(&self) -> Vec<&ColumnSpec> {
        self.fixed_side(FixedSide::Left)
    }

    /// Columns pinned right, in pin order.
    pub fn right_fixed(&self) -> Vec<&ColumnSpec> {
        self.fixed_side(FixedSide::Right)
    }

    /// Unpinned columns, in display order.
    pub fn scrollable(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.fixed.is_none()).collect()
    }

    fn fixed_side(&self, side: FixedSide) -> Vec<&ColumnSpec> {
        let mut cols: Vec<&ColumnSpec> = self
            .columns
            .iter()
            .filter(|c| c.fixed == Some(side))
            .collect();
        cols.sort_by_key(|c| c.fixed_order.unwrap_or(0));
        cols
    }

    /// Pixel offset of the `index`-th left-pinned column: sum of the
    /// widths of the left-pinned columns before it.
    pub fn left_offset(&self, index: usize) -> u32 {
        self.left_fixed()
            .iter()
            .take(index)
            .map(|c| c.width.unwrap_or(DEFAULT_COLUMN_WIDTH))
            .sum()
    }

    /// Pixel offset of the `index`-th right-pinned column, measured from
    /// the right edge inward: sum of the widths of the right-pinned
    /// columns after it (the rightmost has offset 0).
    pub fn right_offset(&self, index: usize) -> u32 {
        let cols = self.right_fixed();
        cols.iter()
            .skip(index + 1)
            .map(|c| c.width.unwrap_or(DEFAULT_COLUMN_WIDTH))
            .sum()
    }
}

// ----------------------------------------------------------------------
// Resize drag session
// ----------------------------------------------------------------------

/// Transient state of one column-resize drag.
///
/// Captured once at drag start; every update is a pure function of the
/// captured state and the current pointer position, so repeated updates
/// accumulate no rounding error.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    field: String,
    start_x: i32,
    start_width: u32,
}

impl ResizeSession {
    pub fn new(field: impl Into<String>, start_x: i32, start_width: u32) -> Self {
        ResizeSession {
            field: field.into(),
            start_x,
            start_width,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Width the dragged column should have with the pointer at
    /// `pointer_x`, clamped to [`MIN_COLUMN_WIDTH`].
    pub fn width_at(&self, pointer_x: i32) -> u32 {
        let delta = i64::from(pointer_x) - i64::from(self.start_x);
        let width = i64::from(self.start_width) + delta;
        width.max(i64::from(MIN_COLUMN_WIDTH)) as u32
    }
}
