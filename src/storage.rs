//! Durable key/value storage backing the session.
//!
//! The session only ever needs string keys mapping to string values, so the
//! backends are deliberately tiny: an in-process map and a single JSON file in
//! the SDK data directory. A file written by another process (a second
//! dashboard window, a CLI) is picked up with [`KeyValueStorage::reload`], which
//! reports the keys that changed as [`StorageEvent`]s.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::config;
use crate::error::{Result, WordbookError};

/// String-keyed durable storage.
///
/// Reads never fail: an unreadable entry is reported as absent.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Pick up changes made by other writers of the same durable store.
    ///
    /// Backends without an external writer report nothing.
    fn reload(&self) -> Result<Vec<StorageEvent>> {
        Ok(Vec::new())
    }
}

/// Notification that a storage entry changed outside the current owner.
///
/// `key` is `None` when the whole store was wiped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: Option<String>,
}

impl StorageEvent {
    pub fn changed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn cleared() -> Self {
        Self { key: None }
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WordbookError::InvalidArgument("storage lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WordbookError::InvalidArgument("storage lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// Storage persisted as one JSON object in `<dir>/storage.json`.
///
/// Every write rewrites the whole file through a temp file and a rename, so a
/// crash mid-write never leaves a truncated store behind.
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) the store in `dir`.
    ///
    /// If `dir` is `None`, uses [`config::default_data_dir`]. A missing or
    /// corrupt file starts out empty.
    pub fn open(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        let path = dir.join(config::STORAGE_FILE);
        let entries = read_entries(&path);
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let result = (|| -> Result<()> {
            fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn read_entries(path: &Path) -> HashMap<String, String> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return HashMap::new(),
    };
    match serde_json::from_str(&contents) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt storage file, starting empty");
            HashMap::new()
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WordbookError::InvalidArgument("storage lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WordbookError::InvalidArgument("storage lock poisoned".into()))?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    /// Re-read the backing file and report which keys changed since the last
    /// read or write made through this instance.
    fn reload(&self) -> Result<Vec<StorageEvent>> {
        let fresh = read_entries(&self.path);
        let mut entries = self
            .entries
            .write()
            .map_err(|_| WordbookError::InvalidArgument("storage lock poisoned".into()))?;

        let events = if fresh.is_empty() && !entries.is_empty() {
            vec![StorageEvent::cleared()]
        } else {
            let mut keys: Vec<&String> = entries.keys().chain(fresh.keys()).collect();
            keys.sort();
            keys.dedup();
            keys.into_iter()
                .filter(|k| entries.get(*k) != fresh.get(*k))
                .map(|k| StorageEvent::changed(k.as_str()))
                .collect()
        };

        *entries = fresh;
        Ok(events)
    }
}
