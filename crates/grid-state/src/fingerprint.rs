//! Persisted state envelope and the fingerprint it was created for.

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnDef, column_signature};
use crate::state::PartialTableState;

/// The context a persisted value was written under.
///
/// Stored alongside the value and compared structurally with a freshly
/// computed fingerprint on every read; it is never used for anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFor {
    /// Top-level column ids joined in declared order.
    pub columns: String,
    /// The caller's default state at write time.
    pub initial_state: PartialTableState,
}

impl CreatedFor {
    pub fn new(columns: &[ColumnDef], initial_state: PartialTableState) -> Self {
        Self {
            columns: column_signature(columns),
            initial_state,
        }
    }
}

/// What a store holds under a table's key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub created_for: CreatedFor,
    pub value: PartialTableState,
}
