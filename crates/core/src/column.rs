use serde::{Deserialize, Serialize};

use crate::value::DataType;

/// Sort direction for one rule in the sort chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Which viewport edge a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedSide {
    Left,
    Right,
}

/// Descriptor for one column: display metadata plus behavior policy.
///
/// The descriptor collection is ordered; collection order is display order.
/// `field` is unique across the collection, and `fixed_order` is unique and
/// contiguous within each fixed side, assigned by insertion order into that
/// side (the layout model owns that invariant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub field: String,
    pub label: String,
    #[serde(default, rename = "type")]
    pub data_type: DataType,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub grouped_by: bool,
    /// Last direction this column was sorted by; remembered so re-grouping
    /// the column restores its preferred sort.
    #[serde(default)]
    pub sorted_by: Option<SortDirection>,
    #[serde(default)]
    pub fixed: Option<FixedSide>,
    #[serde(default)]
    pub fixed_order: Option<usize>,
    #[serde(default)]
    pub width: Option<u32>,
    /// "All rows selected" indicator; only meaningful on the identity column.
    #[serde(default)]
    pub selected: bool,
    /// The column can never be hidden.
    #[serde(default)]
    pub disable_visibility_toggle: bool,
    /// The column can never be unpinned once fixed.
    #[serde(default)]
    pub reject_when_unfixed: bool,
}

fn default_visible() -> bool {
    true
}

impl ColumnSpec {
    pub fn new(field: impl Into<String>, label: impl Into<String>, data_type: DataType) -> Self {
        ColumnSpec {
            field: field.into(),
            label: label.into(),
            data_type,
            visible: true,
            grouped_by: false,
            sorted_by: None,
            fixed: None,
            fixed_order: None,
            width: None,
            selected: false,
            disable_visibility_toggle: false,
            reject_when_unfixed: false,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn fixed_left(mut self) -> Self {
        self.fixed = Some(FixedSide::Left);
        self
    }

    /// Mark a key column (identity, name) that must stay visible and pinned.
    pub fn protected(mut self) -> Self {
        self.disable_visibility_toggle = true;
        self.reject_when_unfixed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let col = ColumnSpec::new("country", "Country", DataType::Text);
        assert!(col.visible);
        assert!(!col.grouped_by);
        assert_eq!(col.fixed, None);
        assert_eq!(col.width, None);
        assert!(!col.disable_visibility_toggle);
        assert!(!col.reject_when_unfixed);
    }

    #[test]
    fn test_protected_sets_both_policies() {
        let col = ColumnSpec::new("id", "Id", DataType::Number).protected();
        assert!(col.disable_visibility_toggle);
        assert!(col.reject_when_unfixed);
    }

    #[test]
    fn test_descriptor_deserialize_defaults() {
        let raw = serde_json::json!({
            "field": "date",
            "label": "Date",
            "type": "date",
            "width": 150,
        });
        let col: ColumnSpec = serde_json::from_value(raw).unwrap();
        assert_eq!(col.data_type, DataType::Date);
        assert_eq!(col.width, Some(150));
        assert!(col.visible);
        assert_eq!(col.fixed, None);
    }
}
