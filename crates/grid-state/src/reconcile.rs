//! Stored-state reconciliation.
//!
//! A stored value is only trusted when the fingerprint it was written under
//! equals the fingerprint of the live columns and defaults. Any difference
//! (a column added, removed or moved, or a changed default) discards the
//! stored value wholesale in favour of the defaults.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::columns::ColumnDef;
use crate::error::{Result, ViewStateError};
use crate::fingerprint::{CreatedFor, PersistedState};
use crate::state::PartialTableState;
use crate::store::ViewStateStore;

/// Where an effective initial state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSource {
    /// The stored value matched the current fingerprint.
    Stored,
    /// Nothing was stored under the key.
    NothingStored,
    /// A value was stored for a different column set or different defaults.
    Stale,
    /// The stored entry matched but its value could not be decoded.
    Unreadable,
}

impl StateSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::NothingStored => "defaults (nothing stored)",
            Self::Stale => "defaults (stored state is stale)",
            Self::Unreadable => "defaults (stored state unreadable)",
        }
    }
}

impl fmt::Display for StateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of reconciling stored state with the live configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub state: PartialTableState,
    pub source: StateSource,
}

struct Inner {
    store: Arc<dyn ViewStateStore>,
    key: String,
    created_for: RwLock<CreatedFor>,
}

impl Inner {
    fn created_for(&self) -> CreatedFor {
        self.created_for
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self, input: &PartialTableState) -> Result<()> {
        let persisted = PersistedState {
            created_for: self.created_for(),
            value: input.whitelisted(),
        };
        let value =
            serde_json::to_value(&persisted).map_err(|e| ViewStateError::Serialization {
                what: format!("view state for '{}'", self.key),
                source: Box::new(e),
            })?;
        self.store.set(&self.key, &value)
    }
}

/// Decides the effective initial state of one table and persists updates.
///
/// Cloning is cheap; clones share the store, key and fingerprint.
#[derive(Clone)]
pub struct StateReconciler {
    inner: Arc<Inner>,
}

impl fmt::Debug for StateReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateReconciler")
            .field("key", &self.inner.key)
            .field("created_for", &self.inner.created_for())
            .finish_non_exhaustive()
    }
}

impl StateReconciler {
    pub fn new(
        store: Arc<dyn ViewStateStore>,
        key: impl Into<String>,
        columns: &[ColumnDef],
        defaults: PartialTableState,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                key: key.into(),
                created_for: RwLock::new(CreatedFor::new(columns, defaults)),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The fingerprint that reads are checked against and writes are tagged with.
    pub fn created_for(&self) -> CreatedFor {
        self.inner.created_for()
    }

    /// The caller's default state.
    pub fn defaults(&self) -> PartialTableState {
        self.inner.created_for().initial_state
    }

    /// Recompute the fingerprint for new columns or defaults.
    ///
    /// Later reads and writes, including those from setters handed out
    /// earlier, use the new fingerprint.
    pub fn reconfigure(&self, columns: &[ColumnDef], defaults: PartialTableState) {
        let fresh = CreatedFor::new(columns, defaults);
        let mut current = self
            .inner
            .created_for
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *current != fresh {
            tracing::debug!(key = %self.inner.key, columns = %fresh.columns, "Table fingerprint changed");
            *current = fresh;
        }
    }

    /// Reconcile the stored value with the current fingerprint.
    pub fn reconcile(&self) -> Reconciled {
        let created_for = self.inner.created_for();
        let key = self.inner.key.as_str();

        let Some(stored) = self.inner.store.get(key) else {
            tracing::debug!(key, "No stored table state, using defaults");
            return Reconciled {
                state: created_for.initial_state,
                source: StateSource::NothingStored,
            };
        };

        let fresh = match serde_json::to_value(&created_for) {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!(key, "Could not encode table fingerprint: {e}");
                return Reconciled {
                    state: created_for.initial_state,
                    source: StateSource::Unreadable,
                };
            }
        };

        if stored.get("createdFor") != Some(&fresh) {
            tracing::info!(key, "Stored table state was created for a different layout, discarding");
            return Reconciled {
                state: created_for.initial_state,
                source: StateSource::Stale,
            };
        }

        let value = stored.get("value").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<PartialTableState>(value) {
            Ok(state) => {
                tracing::debug!(key, "Restored stored table state");
                Reconciled {
                    state,
                    source: StateSource::Stored,
                }
            }
            Err(e) => {
                tracing::warn!(key, "Stored table state could not be decoded: {e}");
                Reconciled {
                    state: created_for.initial_state,
                    source: StateSource::Unreadable,
                }
            }
        }
    }

    /// The effective initial state to feed the table engine.
    pub fn initial_state(&self) -> PartialTableState {
        self.reconcile().state
    }

    /// Persist the whitelisted fields of `input` under the current fingerprint.
    pub fn set_state(&self, input: &PartialTableState) -> Result<()> {
        self.inner.write(input)
    }

    /// Remove whatever is stored for this table.
    pub fn clear(&self) -> Result<bool> {
        self.inner.store.remove(&self.inner.key)
    }

    /// A detached setter for the rendering layer.
    pub fn setter(&self) -> StateSetter {
        StateSetter {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Persists table state on behalf of a [`StateReconciler`].
///
/// Write failures are logged and dropped; the next write supersedes them.
#[derive(Clone)]
pub struct StateSetter {
    inner: Arc<Inner>,
}

impl fmt::Debug for StateSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSetter")
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl StateSetter {
    pub fn set(&self, input: &PartialTableState) {
        if let Err(e) = self.inner.write(input) {
            tracing::warn!(key = %self.inner.key, "Dropped table state write: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ColumnSort, ExpandedState, PaginationState, TableState};
    use crate::store::MemoryStore;

    const KEY: &str = "tableState:test";

    fn columns(ids: &[&str]) -> Vec<ColumnDef> {
        ids.iter().map(|id| ColumnDef::accessor(*id)).collect()
    }

    fn defaults() -> PartialTableState {
        PartialTableState {
            pagination: Some(PaginationState::new(0, 25)),
            ..Default::default()
        }
    }

    fn moved_state() -> PartialTableState {
        PartialTableState {
            pagination: Some(PaginationState::new(2, 25)),
            sorting: Some(vec![ColumnSort::desc("A")]),
            ..Default::default()
        }
    }

    fn reconciler(store: &Arc<MemoryStore>, ids: &[&str]) -> StateReconciler {
        StateReconciler::new(store.clone(), KEY, &columns(ids), defaults())
    }

    #[test]
    fn nothing_stored_uses_defaults() {
        let store = Arc::new(MemoryStore::new());
        let reconciled = reconciler(&store, &["A", "B"]).reconcile();

        assert_eq!(reconciled.state, defaults());
        assert_eq!(reconciled.source, StateSource::NothingStored);
    }

    #[test]
    fn stored_state_round_trips() {
        let store = Arc::new(MemoryStore::new());
        reconciler(&store, &["A", "B"]).set_state(&moved_state()).unwrap();

        let reconciled = reconciler(&store, &["A", "B"]).reconcile();
        assert_eq!(reconciled.source, StateSource::Stored);
        assert_eq!(reconciled.state, moved_state());
    }

    #[test]
    fn removing_a_column_discards_stored_state() {
        let store = Arc::new(MemoryStore::new());
        reconciler(&store, &["A", "B"]).set_state(&moved_state()).unwrap();

        let reconciled = reconciler(&store, &["A"]).reconcile();
        assert_eq!(reconciled.source, StateSource::Stale);
        assert_eq!(reconciled.state, defaults());
    }

    #[test]
    fn changed_defaults_discard_stored_state() {
        let store = Arc::new(MemoryStore::new());
        reconciler(&store, &["A", "B"]).set_state(&moved_state()).unwrap();

        let other_defaults = PartialTableState {
            pagination: Some(PaginationState::new(0, 50)),
            ..Default::default()
        };
        let reconciled =
            StateReconciler::new(store.clone(), KEY, &columns(&["A", "B"]), other_defaults.clone())
                .reconcile();
        assert_eq!(reconciled.source, StateSource::Stale);
        assert_eq!(reconciled.state, other_defaults);
    }

    #[test]
    fn setter_drops_transient_fields() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = reconciler(&store, &["A"]);

        let state = TableState {
            expanded: ExpandedState::All(true),
            ..TableState::with_initial(&moved_state())
        };
        reconciler.setter().set(&state.to_partial());

        let raw = store.get(KEY).unwrap();
        assert!(raw["value"].get("expanded").is_none());
        assert!(raw["value"].get("rowSelection").is_none());
        assert_eq!(raw["value"]["pagination"]["pageIndex"], 2);
    }

    #[test]
    fn setter_writes_with_fingerprint_current_at_write_time() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = reconciler(&store, &["A", "B"]);
        let setter = reconciler.setter();

        reconciler.reconfigure(&columns(&["A", "B", "C"]), defaults());
        setter.set(&moved_state());

        assert_eq!(store.get(KEY).unwrap()["createdFor"]["columns"], "A,B,C");
        assert_eq!(reconciler.reconcile().source, StateSource::Stored);
    }

    #[test]
    fn undecodable_value_falls_back_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = reconciler(&store, &["A"]);
        let mut raw = serde_json::json!({ "value": { "pagination": "page two" } });
        raw["createdFor"] = serde_json::to_value(reconciler.created_for()).unwrap();
        store.set(KEY, &raw).unwrap();

        let reconciled = reconciler.reconcile();
        assert_eq!(reconciled.source, StateSource::Unreadable);
        assert_eq!(reconciled.state, defaults());
    }

    #[test]
    fn malformed_text_reads_as_nothing_stored() {
        let store = Arc::new(MemoryStore::new());
        store.insert_raw(KEY, "][");

        let reconciled = reconciler(&store, &["A"]).reconcile();
        assert_eq!(reconciled.source, StateSource::NothingStored);
        assert_eq!(reconciled.state, defaults());
    }

    #[test]
    fn clear_removes_entry() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = reconciler(&store, &["A"]);
        reconciler.set_state(&moved_state()).unwrap();

        assert!(reconciler.clear().unwrap());
        assert_eq!(reconciler.reconcile().source, StateSource::NothingStored);
    }
}
