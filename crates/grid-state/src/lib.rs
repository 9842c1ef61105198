//! Persisted view state for data-grid tables.
//!
//! A table's sorting, filters, pagination, sizing, visibility, order,
//! grouping and global filter survive across sessions, but only while the
//! table still looks the way it did when that state was saved.
//!
//! # Features
//!
//! - **Fingerprinted state**: every stored value carries the column layout and
//!   defaults it was created for; any difference discards it
//! - **Whitelisted fields**: expansion, row selection and pinning are never written
//! - **Debounced writes**: bursts of changes settle into one write
//! - **Pluggable stores**: in-memory, or one JSON file per table with atomic writes
//!
//! # Storage Format
//!
//! ```text
//! "tableState:<name>" => {
//!   "createdFor": { "columns": "_selector,Name,Info", "initialState": { ... } },
//!   "value":      { "sorting": [...], "pagination": { ... }, ... }
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use grid_state::{ColumnDef, JsonFileStore, StateOnlyEngine, TableSession, ViewStateConfig};
//!
//! let config = ViewStateConfig::load();
//! let store = Arc::new(JsonFileStore::new(config.resolved_storage_dir()));
//! let mut session = TableSession::open(store, &config, "people", columns, Default::default());
//!
//! let mut engine = StateOnlyEngine::new();
//! session.mount(&mut engine);
//! // ... on every engine state change:
//! session.sync(&engine);
//! ```
//!
//! # Architecture
//!
//! - `state/` - Table state model, full and partial
//! - `store/` - Key-value stores for persisted state
//! - `reconcile.rs` - Fingerprint check and the state setter
//! - `debounce/` - Quiet-period gate in front of the setter
//! - `session.rs` - Per-table wiring of all of the above
//! - `filters/` - Custom column filter functions
//! - `view/` - Pagination, filter chips, column picker, debug snapshot
//! - `error.rs` - Error types with user-friendly messages

mod columns;
mod config;
mod debounce;
mod engine;
mod error;
mod fingerprint;
mod filters;
mod reconcile;
mod session;
mod state;
mod store;
pub mod view;

// Re-export main types
pub use columns::{
    Align, ColumnDef, SELECTOR_COLUMN_ID, SIGNATURE_SEPARATOR, camel_to_words, column_signature,
    find_leaf, first_leaf, leaf_columns,
};
pub use config::{DEFAULT_PAGE_SIZE, ROWS_PER_PAGE_OPTIONS, ViewStateConfig};
pub use debounce::{DebounceConfig, DebounceGate};
pub use engine::{StateOnlyEngine, TableEngine};
pub use error::{Result, ViewStateError};
pub use filters::{FilterFnKind, NumericFilter, fuzzy_rank, fuzzy_text_matches, is_falsy};
pub use fingerprint::{CreatedFor, PersistedState};
pub use reconcile::{Reconciled, StateReconciler, StateSetter, StateSource};
pub use session::TableSession;
pub use state::{
    ColumnFilter, ColumnFiltersState, ColumnOrderState, ColumnPinningState, ColumnSizingState,
    ColumnSort, ExpandedState, GroupingState, PERSISTED_FIELDS, PaginationState,
    PartialTableState, RowSelectionState, SortingState, TableState, VisibilityState,
};
pub use store::{JsonFileStore, MemoryStore, TABLE_KEY_PREFIX, ViewStateStore, table_state_key};
