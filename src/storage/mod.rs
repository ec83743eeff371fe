//! Durable key-value stores the cache and settings are layered over.
//!
//! Every backend exposes the same string-keyed contract through
//! [`KeyValueStore`]. Methods take `&self` so one handle can be shared
//! (through `Arc`) by the response cache and the settings module.

mod file;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::sync::Arc;

use crate::types::config::{StorageBackend, StorageConfig};
use crate::{LeetHelperError, LeetHelperResult};

pub use file::JsonFileStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// String key-value persistence.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> LeetHelperResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> LeetHelperResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> LeetHelperResult<()>;

    /// Lists every key in the store.
    fn keys(&self) -> LeetHelperResult<Vec<String>>;

    /// Lists the keys that start with `prefix`, compared literally.
    fn keys_with_prefix(&self, prefix: &str) -> LeetHelperResult<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> LeetHelperResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> LeetHelperResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> LeetHelperResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> LeetHelperResult<Vec<String>> {
        (**self).keys()
    }

    fn keys_with_prefix(&self, prefix: &str) -> LeetHelperResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> LeetHelperResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> LeetHelperResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> LeetHelperResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> LeetHelperResult<Vec<String>> {
        (**self).keys()
    }

    fn keys_with_prefix(&self, prefix: &str) -> LeetHelperResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}

/// Opens the store described by the configuration.
///
/// Creates the parent directory of the store path when needed.
pub fn open_store(config: &StorageConfig) -> LeetHelperResult<Arc<dyn KeyValueStore>> {
    if config.backend != StorageBackend::Memory {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                tracing::debug!("Store directory created: {}", parent.display());
            }
        }
    }

    tracing::debug!(backend = %config.backend, path = %config.path.display(), "Opening store");

    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::File => Ok(Arc::new(JsonFileStore::open(&config.path)?)),
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => Ok(Arc::new(SqliteStore::open(&config.path)?)),
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => Err(LeetHelperError::config(
            "the sqlite backend requires the 'sqlite' feature",
        )),
    }
}

pub(crate) fn poisoned<T>(_: std::sync::PoisonError<T>) -> LeetHelperError {
    LeetHelperError::storage("store lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix_filter() {
        let store = MemoryStore::new();
        store.set("leethelper_two-sum", "{}").unwrap();
        store.set("leethelperX", "{}").unwrap();
        store.set("gemini_api_key", "k").unwrap();

        let keys = store.keys_with_prefix("leethelper_").unwrap();
        assert_eq!(keys, vec!["leethelper_two-sum".to_string()]);
    }

    #[test]
    fn test_arc_shares_state() {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);

        store.set("a", "1").unwrap();
        assert_eq!(other.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_open_file_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            path: dir.path().join("nested").join("store.json"),
        };

        let store = open_store(&config).unwrap();
        store.set("k", "v").unwrap();

        assert!(config.path.exists());
    }

    #[test]
    fn test_open_memory_store() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            path: "unused".into(),
        };

        let store = open_store(&config).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
