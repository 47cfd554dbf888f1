//! Durable key-value storage
//!
//! Small string values keyed by name, read once at startup and written
//! synchronously after each change. The file backend keeps one JSON object.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::history::SearchHistory;

pub const HISTORY_KEY: &str = "searchHistory";
pub const DARK_MODE_KEY: &str = "darkMode";

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// File Backend
// ============================================================================

pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "state file unreadable, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "state file unreadable, starting empty");
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

// ============================================================================
// Memory Backend
// ============================================================================

/// In-process store; clones share the same map
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().insert(key.to_string(), value.to_string());
        self
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.lock().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

// ============================================================================
// Typed Accessors
// ============================================================================

/// Read the persisted history; anything unreadable yields an empty history
pub fn load_history(store: &dyn KeyValueStore, capacity: usize) -> SearchHistory {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return SearchHistory::with_capacity(capacity),
        Err(e) => {
            tracing::warn!(error = %e, "could not read search history");
            return SearchHistory::with_capacity(capacity);
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(entries) => SearchHistory::from_entries(entries, capacity),
        Err(e) => {
            tracing::warn!(error = %e, "stored search history is not a string list, ignoring");
            SearchHistory::with_capacity(capacity)
        }
    }
}

pub fn save_history(store: &dyn KeyValueStore, entries: &[String]) -> Result<()> {
    let encoded = serde_json::to_string(entries)?;
    store.set(HISTORY_KEY, &encoded)
}

/// Only the exact string `true` enables dark mode
pub fn load_dark_mode(store: &dyn KeyValueStore) -> bool {
    match store.get(DARK_MODE_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            tracing::warn!(error = %e, "could not read dark mode flag");
            false
        }
    }
}

pub fn save_dark_mode(store: &dyn KeyValueStore, enabled: bool) -> Result<()> {
    store.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
}

pub fn clear_history(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(HISTORY_KEY)
}
