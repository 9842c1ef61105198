//! Read-only helpers for the parts of the table UI that sit around the grid.
//!
//! Nothing here mutates state; each helper derives what a toolbar, chip bar
//! or pagination control needs from the columns and the current state.

mod chips;
mod columns;
mod context;
mod pagination;

pub use chips::{FilterChip, active_filter_chips};
pub use columns::{can_toggle_visibility, hidable_columns, is_column_visible, show_column_picker};
pub use context::{Header, HeaderGroup, TableContext, header_groups};
pub use pagination::PageInfo;
