//! Best-effort key-value persistence.
//!
//! Backends implement [`KeyValueStore`] and report failures as [`StorageError`].
//! The [`Storage`] facade on top never fails: it logs the error and answers with
//! `false` or the caller's default, so a broken store can't break a session.

mod prefs;
mod sqlite;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use prefs::{CART_KEY, CartStore, SETTINGS_KEY, Settings, UserSettings};
pub use sqlite::{SqliteStore, default_path as default_sqlite_path};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// String key to string value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

impl<T> KeyValueStore for Arc<T>
where
    T: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// A backend chosen at runtime.
pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

/// Process-local store. Clones do not share contents; wrap in `Arc` to share.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::backend("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries()?.clear();
        Ok(())
    }
}

/// JSON-encoding facade that swallows (and logs) every failure.
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "storage write failed");
                false
            }
        }
    }

    /// Stored value for `key`, or `default` when absent, unreadable or undecodable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                tracing::error!(key, error = %err, "storage read failed");
                default
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove(key) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "storage remove failed");
                false
            }
        }
    }

    pub fn clear(&self) -> bool {
        match self.store.clear() {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "storage clear failed");
                false
            }
        }
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that fails every call.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::backend("quota exceeded"))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::backend("quota exceeded"))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::backend("quota exceeded"))
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::backend("quota exceeded"))
        }
    }

    #[test]
    fn memory_store_basic_operations() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.len(), 1);

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn storage_get_falls_back_to_default() {
        let storage = Storage::new(MemoryStore::new());
        assert_eq!(storage.get("missing", 7u32), 7);

        storage.store().set("garbled", "{not json").unwrap();
        assert_eq!(storage.get("garbled", vec![1u8]), vec![1u8]);

        assert!(storage.set("n", &42u32));
        assert_eq!(storage.get("n", 0u32), 42);
    }

    #[test]
    fn backend_failures_are_swallowed() {
        let storage = Storage::new(BrokenStore);
        assert!(!storage.set("k", "v"));
        assert_eq!(storage.get("k", String::from("fallback")), "fallback");
        assert!(!storage.remove("k"));
        assert!(!storage.clear());
    }

    #[test]
    fn shared_store_is_usable_through_the_facade() {
        let shared: SharedStore = Arc::new(MemoryStore::new());
        let storage = Storage::new(shared.clone());
        assert!(storage.set("theme", "dark"));
        assert_eq!(shared.get("theme").unwrap().as_deref(), Some("\"dark\""));
    }
}
