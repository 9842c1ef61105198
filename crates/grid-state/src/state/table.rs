//! Full and partial table state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{
    ColumnFiltersState, ColumnOrderState, ColumnPinningState, ColumnSizingState, ExpandedState,
    GroupingState, PaginationState, RowSelectionState, SortingState, VisibilityState,
};

/// JSON keys of the fields that survive across sessions.
///
/// Expansion, row selection and pinning are transient and never written.
pub const PERSISTED_FIELDS: [&str; 8] = [
    "sorting",
    "columnFilters",
    "pagination",
    "columnSizing",
    "columnVisibility",
    "columnOrder",
    "grouping",
    "globalFilter",
];

/// Complete state of a table instance as held by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableState {
    pub sorting: SortingState,
    pub column_filters: ColumnFiltersState,
    pub pagination: PaginationState,
    pub column_sizing: ColumnSizingState,
    pub column_visibility: VisibilityState,
    pub column_order: ColumnOrderState,
    pub grouping: GroupingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_filter: Option<Value>,
    pub expanded: ExpandedState,
    pub row_selection: RowSelectionState,
    pub column_pinning: ColumnPinningState,
}

impl TableState {
    /// Build engine state from an initial partial state.
    ///
    /// Fields absent from `initial` keep the engine defaults.
    pub fn with_initial(initial: &PartialTableState) -> Self {
        let mut state = Self::default();
        state.apply(initial);
        state
    }

    /// Overwrite every field that is present in `partial`.
    pub fn apply(&mut self, partial: &PartialTableState) {
        if let Some(sorting) = &partial.sorting {
            self.sorting = sorting.clone();
        }
        if let Some(filters) = &partial.column_filters {
            self.column_filters = filters.clone();
        }
        if let Some(pagination) = partial.pagination {
            self.pagination = pagination;
        }
        if let Some(sizing) = &partial.column_sizing {
            self.column_sizing = sizing.clone();
        }
        if let Some(visibility) = &partial.column_visibility {
            self.column_visibility = visibility.clone();
        }
        if let Some(order) = &partial.column_order {
            self.column_order = order.clone();
        }
        if let Some(grouping) = &partial.grouping {
            self.grouping = grouping.clone();
        }
        if let Some(global) = &partial.global_filter {
            self.global_filter = Some(global.clone());
        }
        if let Some(expanded) = &partial.expanded {
            self.expanded = expanded.clone();
        }
        if let Some(selection) = &partial.row_selection {
            self.row_selection = selection.clone();
        }
        if let Some(pinning) = &partial.column_pinning {
            self.column_pinning = pinning.clone();
        }
    }

    /// Every field of this state, as a partial state.
    pub fn to_partial(&self) -> PartialTableState {
        PartialTableState {
            sorting: Some(self.sorting.clone()),
            column_filters: Some(self.column_filters.clone()),
            pagination: Some(self.pagination),
            column_sizing: Some(self.column_sizing.clone()),
            column_visibility: Some(self.column_visibility.clone()),
            column_order: Some(self.column_order.clone()),
            grouping: Some(self.grouping.clone()),
            global_filter: self.global_filter.clone(),
            expanded: Some(self.expanded.clone()),
            row_selection: Some(self.row_selection.clone()),
            column_pinning: Some(self.column_pinning.clone()),
        }
    }
}

/// A table state where every field is optional.
///
/// Used for caller defaults, for the effective initial state, and for the
/// persisted value. Absent fields are left out of the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialTableState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting: Option<SortingState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_filters: Option<ColumnFiltersState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_sizing: Option<ColumnSizingState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_visibility: Option<VisibilityState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_order: Option<ColumnOrderState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<GroupingState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<ExpandedState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_selection: Option<RowSelectionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_pinning: Option<ColumnPinningState>,
}

impl PartialTableState {
    /// Only the persisted fields of this state; transient fields are dropped.
    ///
    /// A null global filter counts as no global filter, since it would read
    /// back as absent.
    pub fn whitelisted(&self) -> Self {
        Self {
            sorting: self.sorting.clone(),
            column_filters: self.column_filters.clone(),
            pagination: self.pagination,
            column_sizing: self.column_sizing.clone(),
            column_visibility: self.column_visibility.clone(),
            column_order: self.column_order.clone(),
            grouping: self.grouping.clone(),
            global_filter: self.global_filter.clone().filter(|value| !value.is_null()),
            expanded: None,
            row_selection: None,
            column_pinning: None,
        }
    }

    /// Field-wise overlay: fields present in `self` win, the rest come from `base`.
    #[must_use]
    pub fn merged_over(self, base: &Self) -> Self {
        Self {
            sorting: self.sorting.or_else(|| base.sorting.clone()),
            column_filters: self.column_filters.or_else(|| base.column_filters.clone()),
            pagination: self.pagination.or(base.pagination),
            column_sizing: self.column_sizing.or_else(|| base.column_sizing.clone()),
            column_visibility: self
                .column_visibility
                .or_else(|| base.column_visibility.clone()),
            column_order: self.column_order.or_else(|| base.column_order.clone()),
            grouping: self.grouping.or_else(|| base.grouping.clone()),
            global_filter: self.global_filter.or_else(|| base.global_filter.clone()),
            expanded: self.expanded.or_else(|| base.expanded.clone()),
            row_selection: self.row_selection.or_else(|| base.row_selection.clone()),
            column_pinning: self.column_pinning.or_else(|| base.column_pinning.clone()),
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&TableState> for PartialTableState {
    fn from(state: &TableState) -> Self {
        state.to_partial()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::state::types::{ColumnSort, PaginationState};

    #[test]
    fn whitelist_drops_transient_fields() {
        let mut state = TableState {
            sorting: vec![ColumnSort::desc("age")],
            expanded: ExpandedState::All(true),
            ..Default::default()
        };
        state.row_selection.insert("1".into(), true);

        let persisted = state.to_partial().whitelisted();
        assert_eq!(persisted.sorting, Some(vec![ColumnSort::desc("age")]));
        assert!(persisted.expanded.is_none());
        assert!(persisted.row_selection.is_none());
        assert!(persisted.column_pinning.is_none());

        let json = serde_json::to_value(&persisted).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        for key in keys {
            assert!(PERSISTED_FIELDS.contains(&key.as_str()), "leaked {key}");
        }
    }

    #[test]
    fn null_global_filter_is_not_persisted() {
        let partial = PartialTableState {
            global_filter: Some(Value::Null),
            ..Default::default()
        };
        assert_eq!(partial.whitelisted().global_filter, None);
        assert_eq!(serde_json::to_string(&partial.whitelisted()).unwrap(), "{}");
    }

    #[test]
    fn merged_over_prefers_self() {
        let base = PartialTableState {
            pagination: Some(PaginationState::new(0, 25)),
            grouping: Some(vec!["status".into()]),
            ..Default::default()
        };
        let user = PartialTableState {
            pagination: Some(PaginationState::new(0, 50)),
            ..Default::default()
        };

        let merged = user.merged_over(&base);
        assert_eq!(merged.pagination, Some(PaginationState::new(0, 50)));
        assert_eq!(merged.grouping, Some(vec!["status".to_string()]));
    }

    #[test]
    fn with_initial_keeps_engine_defaults() {
        let mut sizing = BTreeMap::new();
        sizing.insert("age".to_string(), 120.0);
        let initial = PartialTableState {
            column_sizing: Some(sizing.clone()),
            ..Default::default()
        };

        let state = TableState::with_initial(&initial);
        assert_eq!(state.column_sizing, sizing);
        assert_eq!(state.pagination, PaginationState::default());
        assert!(state.sorting.is_empty());
    }

    #[test]
    fn empty_partial_serializes_to_empty_object() {
        let json = serde_json::to_string(&PartialTableState::default()).unwrap();
        assert_eq!(json, "{}");
        assert!(PartialTableState::default().is_empty());
    }
}
