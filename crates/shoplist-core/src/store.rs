//! Persistence of the item collection.
//!
//! A [`Storage`] is a plain key-value slot capability. [`ListStore`] binds one
//! slot and applies the list's load/save contract on top of it: loading never
//! fails, a missing or corrupt slot simply yields an empty list.

use crate::error::StoreError;
use crate::models::Item;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default slot name for the shopping list.
pub const DEFAULT_KEY: &str = "shopping-list";

/// Raw key-value persistence.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Readers only ever see a complete file.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| io_err(e.error))?;

        Ok(())
    }
}

/// In-process storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The shopping list bound to one storage slot.
#[derive(Debug, Clone)]
pub struct ListStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> ListStore<S> {
    /// Bind `storage` using [`DEFAULT_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the persisted collection.
    ///
    /// An absent slot, a read failure, or a value that is not a list of items
    /// all yield an empty collection.
    pub fn load(&self) -> Vec<Item> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored list under {:?}", self.key);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read stored list, starting empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Item>>(&raw) {
            Ok(items) => {
                tracing::debug!("Loaded {} items from {:?}", items.len(), self.key);
                items
            }
            Err(e) => {
                tracing::warn!("Stored list under {:?} is malformed, starting empty: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with `items`.
    pub fn save(&mut self, items: &[Item]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.storage.write(&self.key, &raw)?;
        tracing::debug!("Saved {} items to {:?}", items.len(), self.key);
        Ok(())
    }
}
