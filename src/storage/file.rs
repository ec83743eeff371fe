//! Store persisted as a single JSON object file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{poisoned, KeyValueStore};
use crate::{LeetHelperError, LeetHelperResult};

/// Store that keeps every key in one JSON object on disk.
///
/// Every operation reads the file again, so keys written by other handles
/// or processes are seen and kept. Mutations rewrite the whole object
/// through a temporary sibling file followed by a rename, so a crash
/// mid-write leaves the previous file intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> LeetHelperResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = load(&path)?;

        tracing::debug!(path = %path.display(), keys = entries.len(), "JSON store opened");

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> LeetHelperResult<()> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self
            .path
            .with_extension(format!("json.{}.tmp", std::process::id()));
        std::fs::write(&tmp, content)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

fn load(path: &Path) -> LeetHelperResult<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        LeetHelperError::storage(format!(
            "store file {} is not a JSON object of strings: {}",
            path.display(),
            e
        ))
    })
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> LeetHelperResult<Option<String>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(load(&self.path)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> LeetHelperResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut entries = load(&self.path)?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> LeetHelperResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut entries = load(&self.path)?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> LeetHelperResult<Vec<String>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(load(&self.path)?.into_keys().collect())
    }
}
