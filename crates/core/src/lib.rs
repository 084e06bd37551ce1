//! `trellis-core` — shared types for the trellis data-grid engine.
//!
//! Pure type crate: field values, records, and column descriptors.
//! Behavior (layout, sorting, grouping) lives in `trellis-engine`.

pub mod column;
pub mod record;
pub mod value;

pub use column::{ColumnSpec, FixedSide, SortDirection};
pub use record::Record;
pub use value::{DataType, Value};
