//! Key-value persistence for the selected display mode.
//!
//! The controller only ever needs string reads and writes on a handful of
//! well-known keys, which is the shape of browser `localStorage`. Hosts plug
//! their storage in through [`ModeStore`]; this module ships an in-memory
//! store, a store that is always unavailable, and a JSON file store for
//! desktop or test hosts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::ModeError;

/// A string key-value store.
///
/// Implementations report any failure (storage disabled, quota, I/O) as
/// [`ModeError::StoreUnavailable`]. The controller swallows these errors.
pub trait ModeStore {
    /// Reads `key`, returning `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, ModeError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ModeError>;
}

impl<S: ModeStore + ?Sized> ModeStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, ModeError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ModeError> {
        (**self).set(key, value)
    }
}

/// In-memory store.
///
/// Clones share the same entries, so a host can keep a handle to inspect or
/// seed the store after handing a clone to the controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning `self` for chaining.
    pub fn with(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Returns a copy of the value under `key`.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ModeStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ModeError> {
        Ok(self.peek(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ModeError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store that fails every operation, as when the host disables storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl ModeStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, ModeError> {
        Err(ModeError::StoreUnavailable("storage is disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), ModeError> {
        Err(ModeError::StoreUnavailable("storage is disabled".to_string()))
    }
}

/// A store backed by a flat JSON object on disk.
///
/// A missing file reads as an empty store and is created on first write.
/// The whole file is rewritten on every write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, ModeError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(ModeError::StoreUnavailable(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            ModeError::StoreUnavailable(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

impl ModeStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ModeError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ModeError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| ModeError::StoreUnavailable(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            ModeError::StoreUnavailable(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}
