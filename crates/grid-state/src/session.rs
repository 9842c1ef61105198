//! One table's persisted view state, wired the way a table component uses it.
//!
//! A session reconciles the stored state once when opened, seeds the engine
//! with it, and then funnels every observed state through a debounce gate
//! into the store.

use std::sync::Arc;

use crate::columns::ColumnDef;
use crate::config::ViewStateConfig;
use crate::debounce::DebounceGate;
use crate::engine::TableEngine;
use crate::reconcile::{StateReconciler, StateSource};
use crate::state::{PaginationState, PartialTableState, TableState};
use crate::store::{ViewStateStore, table_state_key};

/// Persisted view state for one named table.
#[derive(Debug)]
pub struct TableSession {
    columns: Vec<ColumnDef>,
    reconciler: StateReconciler,
    gate: DebounceGate<PartialTableState>,
    initial_state: PartialTableState,
    source: StateSource,
}

impl TableSession {
    /// Open the session for table `name`.
    ///
    /// The selection column is prepended when enabled, and the caller's
    /// defaults are laid over the configured page size.
    pub fn open(
        store: Arc<dyn ViewStateStore>,
        config: &ViewStateConfig,
        name: &str,
        user_columns: Vec<ColumnDef>,
        user_defaults: PartialTableState,
    ) -> Self {
        let columns = effective_columns(config, user_columns);
        let defaults = effective_defaults(config, user_defaults);
        let key = table_state_key(&config.key_prefix, name);

        let reconciler = StateReconciler::new(store, key, &columns, defaults);
        let reconciled = reconciler.reconcile();
        tracing::info!(
            key = reconciler.key(),
            source = %reconciled.source,
            "Opened table session"
        );

        let setter = reconciler.setter();
        let gate = DebounceGate::new(config.debounce.clone(), move |state: PartialTableState| {
            setter.set(&state);
        });

        Self {
            columns,
            reconciler,
            gate,
            initial_state: reconciled.state,
            source: reconciled.source,
        }
    }

    /// Columns a session would hand to the engine for `user_columns`.
    pub fn columns_for(config: &ViewStateConfig, user_columns: Vec<ColumnDef>) -> Vec<ColumnDef> {
        effective_columns(config, user_columns)
    }

    /// The effective initial state decided when the session opened.
    pub fn initial_state(&self) -> &PartialTableState {
        &self.initial_state
    }

    pub fn source(&self) -> StateSource {
        self.source
    }

    /// Columns as handed to the engine, selection column included.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn key(&self) -> &str {
        self.reconciler.key()
    }

    pub fn reconciler(&self) -> &StateReconciler {
        &self.reconciler
    }

    /// Seed `engine` with the initial state.
    pub fn mount(&self, engine: &mut impl TableEngine) {
        engine.reset_state(&self.initial_state);
    }

    /// Record a state change. It is written once changes stop for the quiet period.
    pub fn observe(&mut self, state: &TableState) {
        self.gate.push(state.to_partial());
    }

    /// Record the engine's current state.
    pub fn sync(&mut self, engine: &impl TableEngine) {
        self.observe(&engine.state());
    }

    /// Swap in new columns or defaults while the session stays open.
    ///
    /// The stored state is not re-read; later writes carry the new fingerprint.
    pub fn reconfigure(
        &mut self,
        config: &ViewStateConfig,
        user_columns: Vec<ColumnDef>,
        user_defaults: PartialTableState,
    ) {
        self.columns = effective_columns(config, user_columns);
        self.reconciler
            .reconfigure(&self.columns, effective_defaults(config, user_defaults));
    }

    /// Write a pending change now. Returns whether anything was pending.
    pub fn flush(&mut self) -> bool {
        self.gate.flush()
    }

    /// Whether a change is waiting for the quiet period.
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// The last state handed to the store.
    pub fn last_written(&self) -> Option<PartialTableState> {
        self.gate.settled()
    }

    /// Tear the session down. A change still waiting is discarded.
    pub fn close(mut self) {
        if self.gate.is_pending() {
            tracing::debug!(key = self.reconciler.key(), "Discarding unsettled table state");
        }
        self.gate.cancel();
    }
}

fn effective_columns(config: &ViewStateConfig, user_columns: Vec<ColumnDef>) -> Vec<ColumnDef> {
    if config.selection_column {
        std::iter::once(ColumnDef::selector())
            .chain(user_columns)
            .collect()
    } else {
        user_columns
    }
}

fn effective_defaults(
    config: &ViewStateConfig,
    user_defaults: PartialTableState,
) -> PartialTableState {
    let base = PartialTableState {
        pagination: Some(PaginationState::new(0, config.default_page_size)),
        ..Default::default()
    };
    user_defaults.merged_over(&base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::column_signature;
    use crate::engine::StateOnlyEngine;
    use crate::store::MemoryStore;

    fn open(store: &Arc<MemoryStore>, config: &ViewStateConfig) -> TableSession {
        TableSession::open(
            store.clone(),
            config,
            "people",
            vec![ColumnDef::accessor("name"), ColumnDef::accessor("age")],
            PartialTableState::default(),
        )
    }

    #[test]
    fn selection_column_and_page_size_defaults() {
        let store = Arc::new(MemoryStore::new());
        let session = open(&store, &ViewStateConfig::default());

        assert_eq!(session.key(), "tableState:people");
        assert_eq!(column_signature(session.columns()), "_selector,name,age");
        assert_eq!(
            session.initial_state().pagination,
            Some(PaginationState::new(0, 25))
        );
        assert_eq!(session.source(), StateSource::NothingStored);
    }

    #[test]
    fn selection_column_can_be_disabled() {
        let store = Arc::new(MemoryStore::new());
        let config = ViewStateConfig {
            selection_column: false,
            ..Default::default()
        };
        assert_eq!(column_signature(open(&store, &config).columns()), "name,age");
    }

    #[test]
    fn caller_defaults_win_over_page_size() {
        let store = Arc::new(MemoryStore::new());
        let session = TableSession::open(
            store,
            &ViewStateConfig::default(),
            "people",
            vec![ColumnDef::accessor("name")],
            PartialTableState {
                pagination: Some(PaginationState::new(0, 100)),
                ..Default::default()
            },
        );
        assert_eq!(
            session.initial_state().pagination,
            Some(PaginationState::new(0, 100))
        );
    }

    #[test]
    fn mount_seeds_engine() {
        let store = Arc::new(MemoryStore::new());
        let session = open(&store, &ViewStateConfig::default());
        let mut engine = StateOnlyEngine::new();
        session.mount(&mut engine);
        assert_eq!(engine.state().pagination.page_size, 25);
    }

    #[test]
    fn flush_writes_outside_runtime() {
        let store = Arc::new(MemoryStore::new());
        let mut session = open(&store, &ViewStateConfig::default());
        let mut engine = StateOnlyEngine::new();
        session.mount(&mut engine);

        engine.update(|state| state.pagination.page_index = 3);
        session.sync(&engine);
        session.flush();

        let reopened = open(&store, &ViewStateConfig::default());
        assert_eq!(reopened.source(), StateSource::Stored);
        assert_eq!(reopened.initial_state().pagination, Some(PaginationState::new(3, 25)));
    }
}
