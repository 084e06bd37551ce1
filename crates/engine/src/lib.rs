//! `trellis-engine` — data-grid state engine.
//!
//! Pure engine crate: receives pre-loaded records and a column descriptor
//! collection, exposes state-transition operations and derived views
//! (sorted list, grouped tree, fixed-column layout). It never touches
//! presentation; the UI layer issues mutations and reads views.

pub mod column;
pub mod grid;
pub mod group;
pub mod sort;
pub mod source;

#[cfg(test)]
pub mod harness;

pub use column::{ColumnLayout, ResizeSession, MIN_COLUMN_WIDTH};
pub use grid::GridState;
pub use group::{build_hierarchy, GroupChildren, GroupNode, Grouping};
pub use sort::{compare_values, SortRule, SortSpec, SortUpdate};
pub use source::{LoadError, RecordSource};
