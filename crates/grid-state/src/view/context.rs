//! Per-application UI context and the debug panel snapshot.

use serde::Serialize;
use serde_json::{Value, json};

use crate::columns::{ColumnDef, leaf_columns};
use crate::state::TableState;

/// UI state shared by every table in one application.
///
/// Owned by the caller and passed to whatever renders the tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableContext {
    debug_open: bool,
}

impl TableContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_debug_open(&self) -> bool {
        self.debug_open
    }

    /// Flip the debug panel; returns the new state.
    pub fn toggle_debug(&mut self) -> bool {
        self.debug_open = !self.debug_open;
        self.debug_open
    }

    /// `{ headerGroups, state }` for the debug panel, or `None` while it is closed.
    pub fn debug_snapshot(&self, columns: &[ColumnDef], state: &TableState) -> Option<Value> {
        self.debug_open.then(|| debug_snapshot(columns, state))
    }
}

fn debug_snapshot(columns: &[ColumnDef], state: &TableState) -> Value {
    json!({
        "headerGroups": header_groups(columns),
        "state": state,
    })
}

/// One cell of a header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub id: String,
    pub column_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub col_span: usize,
    /// Stand-in above a leaf column that is shallower than the deepest group.
    pub is_placeholder: bool,
}

/// One row of headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderGroup {
    pub depth: usize,
    pub headers: Vec<Header>,
}

/// Header rows for a nested column set, top row first.
///
/// Groups sit at their own depth; leaves sit in the bottom row, with
/// placeholders filling the rows above them.
pub fn header_groups(columns: &[ColumnDef]) -> Vec<HeaderGroup> {
    let rows = columns.iter().map(height).max().unwrap_or(0);
    let mut groups: Vec<HeaderGroup> = (0..rows)
        .map(|depth| HeaderGroup {
            depth,
            headers: Vec::new(),
        })
        .collect();
    for column in columns {
        place(column, 0, &mut groups);
    }
    groups
}

fn height(column: &ColumnDef) -> usize {
    1 + column.columns.iter().map(height).max().unwrap_or(0)
}

fn place(column: &ColumnDef, depth: usize, groups: &mut [HeaderGroup]) {
    let bottom = groups.len().saturating_sub(1);
    if column.is_group() {
        groups[depth].headers.push(Header {
            id: format!("{depth}_{}", column.id),
            column_id: column.id.clone(),
            label: column.label(),
            col_span: leaf_columns(&column.columns).len(),
            is_placeholder: false,
        });
        for child in &column.columns {
            place(child, depth + 1, groups);
        }
        return;
    }

    for group in groups.iter_mut().take(bottom).skip(depth) {
        group.headers.push(Header {
            id: format!("{}_{}_placeholder", group.depth, column.id),
            column_id: column.id.clone(),
            label: None,
            col_span: 1,
            is_placeholder: true,
        });
    }
    groups[bottom].headers.push(Header {
        id: format!("{bottom}_{}", column.id),
        column_id: column.id.clone(),
        label: column.label(),
        col_span: 1,
        is_placeholder: false,
    });
}
