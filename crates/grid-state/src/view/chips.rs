//! Active filter chips.

use serde_json::Value;

use crate::columns::{ColumnDef, leaf_columns};
use crate::filters::value_text;
use crate::state::ColumnFiltersState;

/// One removable chip in the "Active filters" bar.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChip {
    pub column_id: String,
    pub label: String,
    pub value: Value,
}

impl FilterChip {
    /// Chip text, e.g. `"Age: >30"`.
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, value_text(&self.value))
    }
}

/// Chips for every leaf column with a filter set, in leaf-column order.
///
/// Filters on unknown columns and filters whose value is null are skipped.
pub fn active_filter_chips(columns: &[ColumnDef], filters: &ColumnFiltersState) -> Vec<FilterChip> {
    if filters.is_empty() {
        return Vec::new();
    }
    leaf_columns(columns)
        .into_iter()
        .filter_map(|column| {
            let filter = filters.iter().find(|f| f.id == column.id)?;
            if filter.value.is_null() {
                return None;
            }
            Some(FilterChip {
                column_id: column.id.clone(),
                label: column.label().unwrap_or_else(|| column.id.clone()),
                value: filter.value.clone(),
            })
        })
        .collect()
}
