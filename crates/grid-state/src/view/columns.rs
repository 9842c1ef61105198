//! Column visibility picker.

use crate::columns::{ColumnDef, leaf_columns};
use crate::state::VisibilityState;

/// Leaf columns the user may hide. The selection column is never offered.
pub fn hidable_columns(columns: &[ColumnDef]) -> Vec<&ColumnDef> {
    leaf_columns(columns)
        .into_iter()
        .filter(|column| !column.is_selector())
        .collect()
}

/// Columns are visible unless explicitly set to `false`.
pub fn is_column_visible(visibility: &VisibilityState, id: &str) -> bool {
    visibility.get(id).copied().unwrap_or(true)
}

/// Whether the visibility checkbox for `id` is enabled.
///
/// Only hidable columns can be toggled, and the last visible one cannot be
/// hidden.
pub fn can_toggle_visibility(columns: &[ColumnDef], visibility: &VisibilityState, id: &str) -> bool {
    if !hidable_columns(columns).iter().any(|column| column.id == id) {
        return false;
    }
    if !is_column_visible(visibility, id) {
        return true;
    }
    let visible = hidable_columns(columns)
        .iter()
        .filter(|column| is_column_visible(visibility, &column.id))
        .count();
    visible > 1
}

/// The picker is only worth showing with more than one hidable column.
pub fn show_column_picker(columns: &[ColumnDef]) -> bool {
    hidable_columns(columns).len() > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::SELECTOR_COLUMN_ID;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::selector(),
            ColumnDef::accessor("a"),
            ColumnDef::accessor("b"),
        ]
    }

    #[test]
    fn selector_is_not_hidable() {
        let cols = columns();
        let ids: Vec<_> = hidable_columns(&cols).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(show_column_picker(&columns()));
        assert!(!show_column_picker(&[ColumnDef::selector(), ColumnDef::accessor("a")]));
    }

    #[test]
    fn last_visible_column_is_locked() {
        let mut visibility = VisibilityState::new();
        assert!(can_toggle_visibility(&columns(), &visibility, "a"));

        visibility.insert("b".into(), false);
        assert!(!can_toggle_visibility(&columns(), &visibility, "a"));
        assert!(can_toggle_visibility(&columns(), &visibility, "b"));
    }

    #[test]
    fn only_hidable_columns_toggle() {
        let visibility = VisibilityState::new();
        assert!(!can_toggle_visibility(&columns(), &visibility, SELECTOR_COLUMN_ID));
        assert!(!can_toggle_visibility(&columns(), &visibility, "missing"));
    }
}
