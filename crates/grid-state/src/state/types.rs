//! Individual table-state slices.
//!
//! Field names serialize in camelCase so the persisted JSON matches the shape
//! the table engine reads and writes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    /// Column identifier.
    pub id: String,
    /// Whether the column sorts descending.
    #[serde(default)]
    pub desc: bool,
}

impl ColumnSort {
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }
}

/// Ordered list of sorted columns (first entry sorts first).
pub type SortingState = Vec<ColumnSort>;

/// An active filter on a single column.
///
/// The value is opaque to this crate: text for text filters, a number for
/// sliders, a `[min, max]` pair for range filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Column identifier.
    pub id: String,
    /// Filter value as entered by the user.
    pub value: Value,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// All active column filters.
pub type ColumnFiltersState = Vec<ColumnFilter>;

/// Page position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl PaginationState {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
        }
    }
}

/// Column id to width in pixels.
pub type ColumnSizingState = BTreeMap<String, f64>;

/// Column id to visibility. Missing ids are visible.
pub type VisibilityState = BTreeMap<String, bool>;

/// Explicit column order by id. Empty means declaration order.
pub type ColumnOrderState = Vec<String>;

/// Ids of grouped columns, outermost group first.
pub type GroupingState = Vec<String>;

/// Row id to selected flag.
pub type RowSelectionState = BTreeMap<String, bool>;

/// Expanded rows: either every row, or a row id to flag map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpandedState {
    All(bool),
    Rows(BTreeMap<String, bool>),
}

impl Default for ExpandedState {
    fn default() -> Self {
        Self::Rows(BTreeMap::new())
    }
}

/// Columns pinned to the left or right edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPinningState {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub left: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub right: Vec<String>,
}
