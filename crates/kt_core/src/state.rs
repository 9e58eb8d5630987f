//! State store for outputs and variables snapshots.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Key of the Terraform outputs snapshot.
pub const OUTPUTS_KEY: &str = "kitchen_terraform_outputs";

/// Key of the Terraform variables snapshot.
pub const VARIABLES_KEY: &str = "kitchen_terraform_variables";

/// Mutable key-value store owned by the host.
pub trait StateStore: Send + Sync {
    fn save(&self, key: &str, value: Value) -> CoreResult<()>;

    /// Load a saved value. Missing keys are an error.
    fn load(&self, key: &str) -> CoreResult<Value>;
}

/// Serialize a snapshot and save it under `key`.
pub fn save_snapshot<T: Serialize>(store: &dyn StateStore, key: &str, snapshot: &T) -> CoreResult<()> {
    store.save(key, serde_json::to_value(snapshot)?)
}

/// Load the snapshot saved under `key`.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> CoreResult<T> {
    Ok(serde_json::from_value(store.load(key)?)?)
}

/// In-memory state store.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn save(&self, key: &str, value: Value) -> CoreResult<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn load(&self, key: &str) -> CoreResult<Value> {
        self.entries
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| CoreError::StateKeyMissing(key.to_string()))
    }
}

/// State store persisted as a JSON document.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the state file if it exists.
    pub fn delete(&self) -> CoreResult<()> {
        let _guard = self.lock.write();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!("Removed state file {:?}", self.path);
        }
        Ok(())
    }

    fn read_entries(&self) -> CoreResult<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl StateStore for FileStateStore {
    fn save(&self, key: &str, value: Value) -> CoreResult<()> {
        let _guard = self.lock.write();
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!("Saved {} to state file {:?}", key, self.path);
        Ok(())
    }

    fn load(&self, key: &str) -> CoreResult<Value> {
        let _guard = self.lock.read();
        self.read_entries()?
            .remove(key)
            .ok_or_else(|| CoreError::StateKeyMissing(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStateStore::new();
        store.save("key", json!({"a": 1})).unwrap();

        assert_eq!(store.load("key").unwrap(), json!({"a": 1}));
        assert!(matches!(store.load("other"), Err(CoreError::StateKeyMissing(_))));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".kitchen").join("default.json");

        FileStateStore::new(&path).save(OUTPUTS_KEY, json!({"ip": "10.0.0.1"})).unwrap();
        FileStateStore::new(&path).save(VARIABLES_KEY, json!({"region": "eu"})).unwrap();

        let store = FileStateStore::new(&path);
        assert_eq!(store.load(OUTPUTS_KEY).unwrap(), json!({"ip": "10.0.0.1"}));
        assert_eq!(store.load(VARIABLES_KEY).unwrap(), json!({"region": "eu"}));

        store.delete().unwrap();
        assert!(!path.exists());
        assert!(matches!(store.load(OUTPUTS_KEY), Err(CoreError::StateKeyMissing(_))));
    }
}
