//! Key-value persistence for table view state.
//!
//! Provides:
//! - `ViewStateStore` - get/set of named JSON blobs
//! - `MemoryStore` - in-process store (tests, ephemeral sessions)
//! - `JsonFileStore` - one JSON file per key under a directory

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;

use crate::error::Result;

/// Default namespace for table state keys.
pub const TABLE_KEY_PREFIX: &str = "tableState:";

/// Storage key for the table called `name` under `prefix`.
pub fn table_state_key(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}")
}

/// A string-keyed store of JSON values.
///
/// `get` fails closed: a missing, unreadable or malformed entry is reported
/// as absent. `set` may fail; callers on the rendering path log and drop
/// the error.
pub trait ViewStateStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &Value) -> Result<()>;

    /// Delete `key`. Returns whether anything was removed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_key_is_namespaced() {
        assert_eq!(table_state_key(TABLE_KEY_PREFIX, "testTable"), "tableState:testTable");
        assert_eq!(table_state_key("grid/", "people"), "grid/people");
    }
}
