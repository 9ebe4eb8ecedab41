//! String-keyed JSON blob storage.
//!
//! Every durable shape in the crate (minigame progress, the resumable-scene
//! record, onboarding flags) goes through [`KeyValueStore`], so the core
//! never touches a concrete backend. On the web the backend is
//! LocalStorage; native hosts and tests use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Failure to write a value to the backing store.
///
/// Reads never fail loudly: a missing or unreadable value is treated as
/// absent. Writes can genuinely be rejected (LocalStorage quota, private
/// browsing), and callers log and carry on with in-memory state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("write rejected by storage backend: {0}")]
    WriteRejected(String),
}

/// A string-keyed store of JSON blobs.
///
/// Implementations use interior mutability where needed; the crate runs on
/// the single-threaded host loop, so handles are cheap clones and nothing
/// here is `Send`.
pub trait KeyValueStore {
    /// Read the value under `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory store backed by a shared map.
///
/// Clones share the same underlying map, mirroring how every LocalStorage
/// handle in a page sees the same data. This is the default backend for
/// native hosts and the fake used throughout the tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Browser LocalStorage backend (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backend().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::backend().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::backend() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("missing").is_none());

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("value"));

        store.set("key", "other").unwrap();
        assert_eq!(store.get("key").as_deref(), Some("other"));

        store.remove("key");
        assert!(store.get("key").is_none());
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("shared", "yes").unwrap();
        assert_eq!(handle.get("shared").as_deref(), Some("yes"));

        handle.remove("shared");
        assert!(store.is_empty());
    }
}
