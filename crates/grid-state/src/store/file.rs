//! Directory-backed JSON store.
//!
//! Each key lives in its own file:
//!
//! ```text
//! <dir>/<sanitized key>-<first 8 bytes of sha256(key) as hex>.json
//! {
//!   "key": "tableState:people",
//!   "state": { ... }
//! }
//! ```
//!
//! The hash suffix keeps keys that sanitize to the same name apart; the
//! original key is kept inside the file so `keys()` can list it.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::ViewStateStore;
use crate::error::{Result, ViewStateError};

const FILE_EXTENSION: &str = "json";

#[derive(Serialize, Deserialize)]
struct Entry {
    key: String,
    state: Value,
}

/// Store writing one JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for(key))
    }

    fn read_entry(path: &Path) -> Option<Entry> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read view state file {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice::<Entry>(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed view state file {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }
}

impl ViewStateStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let entry = Self::read_entry(&self.path_for(key))?;
        // A hash-prefix collision would hand back another table's state.
        (entry.key == key).then_some(entry.state)
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let entry = Entry {
            key: key.to_string(),
            state: value.clone(),
        };
        let bytes =
            serde_json::to_vec_pretty(&entry).map_err(|e| ViewStateError::Serialization {
                what: format!("view state for '{key}'"),
                source: Box::new(e),
            })?;
        let path = self.path_for(key);
        write_atomic(&path, &bytes)?;
        tracing::info!(key, "Saved view state to {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ViewStateError::Io {
                operation: "delete",
                path,
                source: e,
            }),
        }
    }

    fn keys(&self) -> Vec<String> {
        let Ok(read_dir) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = read_dir
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == FILE_EXTENSION))
            .filter_map(|path| Self::read_entry(&path))
            .map(|entry| entry.key)
            .collect();
        keys.sort();
        keys
    }
}

/// File name for a key: readable prefix plus a short content hash.
fn file_name_for(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let digest = Sha256::digest(key.as_bytes());
    format!("{}-{}.{}", sanitized, hex::encode(&digest[..8]), FILE_EXTENSION)
}

/// Write through a temp file and rename, so a crash never leaves a torn file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ViewStateError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let mut file = File::create(&temp_path).map_err(|e| ViewStateError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| ViewStateError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| ViewStateError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ViewStateError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state"));

        store
            .set("tableState:people", &json!({"value": {"grouping": ["status"]}}))
            .unwrap();

        assert!(store.path_for("tableState:people").exists());
        assert_eq!(
            store.get("tableState:people"),
            Some(json!({"value": {"grouping": ["status"]}}))
        );
        assert_eq!(store.keys(), vec!["tableState:people".to_string()]);
    }

    #[test]
    fn similar_keys_get_distinct_files() {
        let store = JsonFileStore::new("/unused");
        assert_ne!(store.path_for("a:b"), store.path_for("a_b"));
        assert!(
            file_name_for("tableState:people").starts_with("tableState_people-"),
            "{}",
            file_name_for("tableState:people")
        );
    }

    #[test]
    fn missing_and_malformed_read_as_absent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.get("tableState:missing"), None);

        fs::write(store.path_for("tableState:broken"), b"{ nope").unwrap();
        assert_eq!(store.get("tableState:broken"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn remove_deletes_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.set("k", &json!(1)).unwrap();

        assert!(store.remove("k").unwrap());
        assert!(!store.path_for("k").exists());
        assert!(!store.remove("k").unwrap());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.set("k", &json!({"a": 1})).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
