//! Table-state model shared by the engine, the reconciler and the stores.

mod table;
mod types;

pub use table::{PERSISTED_FIELDS, PartialTableState, TableState};
pub use types::{
    ColumnFilter, ColumnFiltersState, ColumnOrderState, ColumnPinningState, ColumnSizingState,
    ColumnSort, ExpandedState, GroupingState, PaginationState, RowSelectionState, SortingState,
    VisibilityState,
};
