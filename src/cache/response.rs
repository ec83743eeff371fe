//! Per-question cache of generated text.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::clock::{Clock, SystemClock};
use super::entry::CacheEntry;
use crate::storage::KeyValueStore;
use crate::types::fields::FieldKind;
use crate::LeetHelperResult;

/// Namespace of every key owned by the cache in the shared store.
pub const CACHE_PREFIX: &str = "leethelper_";

/// Entries older than this are treated as absent and evicted on read.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Keys currently stored under the cache prefix (stale ones included).
    pub stored: usize,

    /// Number of hits.
    pub hits: u64,

    /// Number of misses.
    pub misses: u64,

    /// Entries removed because they were stale or corrupt.
    pub evictions: u64,

    /// Successful writes.
    pub writes: u64,

    /// Writes dropped because of a store or serialization failure.
    pub write_failures: u64,
}

impl CacheStats {
    /// Computes the hit rate.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Best-effort cache of generated text, one entry per question.
///
/// Every operation is total: store failures degrade to a miss or a dropped
/// write and are only reported through `tracing`. Entries expire as a whole
/// [`CACHE_TTL`] after their most recent write.
pub struct ResponseCache<S, C = SystemClock> {
    store: S,
    clock: C,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    writes: AtomicU64,
    write_failures: AtomicU64,
}

impl<S: KeyValueStore> ResponseCache<S> {
    /// Creates a cache over `store` using the wall clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ResponseCache<S, C> {
    /// Creates a cache with an explicit time source.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    /// Store key for a question.
    pub fn cache_key(question_id: &str) -> String {
        format!("{}{}", CACHE_PREFIX, question_id)
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn ttl_millis() -> i64 {
        CACHE_TTL.as_millis() as i64
    }

    /// Looks up the entry for a question.
    ///
    /// Returns `None` when nothing is stored, when the record is corrupt or
    /// stale (both are deleted), or when the store cannot be read.
    pub fn get(&self, question_id: &str) -> Option<CacheEntry> {
        let entry = self.read(question_id);
        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    /// Looks up a single field. An empty string is returned as `Some("")`.
    pub fn get_field(&self, question_id: &str, field: FieldKind) -> Option<String> {
        self.get(question_id)
            .and_then(|mut entry| entry.fields.remove(&field))
    }

    fn read(&self, question_id: &str) -> Option<CacheEntry> {
        if question_id.is_empty() {
            return None;
        }

        let key = Self::cache_key(question_id);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(question_id, error = %e, "Failed to read cache entry");
                return None;
            }
        };

        let entry = match CacheEntry::from_json(question_id, &raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(question_id, error = %e, "Corrupt cache entry, removing");
                self.evict(&key);
                return None;
            }
        };

        if entry.is_expired(self.clock.now_millis(), Self::ttl_millis()) {
            tracing::debug!(question_id, "Cache entry expired, removing");
            self.evict(&key);
            return None;
        }

        Some(entry)
    }

    fn evict(&self, key: &str) {
        match self.store.remove(key) {
            Ok(()) => {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => tracing::warn!(key, error = %e, "Failed to evict cache entry"),
        }
    }

    /// Stores `value` for one field, keeping the entry's other fields.
    ///
    /// The previous entry is read through the same expiry check as [`get`],
    /// so writing after expiry starts a fresh entry. Failures are logged and
    /// dropped.
    ///
    /// [`get`]: ResponseCache::get
    pub fn set(&self, question_id: &str, field: FieldKind, value: impl Into<String>) {
        if question_id.is_empty() {
            tracing::debug!(%field, "Ignoring cache write without a question id");
            return;
        }

        match self.try_set(question_id, field, value.into()) {
            Ok(()) => {
                self.writes.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(question_id, %field, "Cached response");
            }
            Err(e) => {
                self.write_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(question_id, %field, error = %e, "Failed to write cache entry");
            }
        }
    }

    fn try_set(&self, question_id: &str, field: FieldKind, value: String) -> LeetHelperResult<()> {
        let now = self.clock.now_millis();
        let mut entry = self
            .read(question_id)
            .unwrap_or_else(|| CacheEntry::new(question_id, now));

        entry.fields.insert(field, value);
        // Never move the timestamp backwards if the clock does
        entry.timestamp = entry.timestamp.max(now);

        let json = entry.to_json()?;
        self.store.set(&Self::cache_key(question_id), &json)
    }

    /// Removes the entry for one question. No-op when absent.
    pub fn clear(&self, question_id: &str) {
        if let Err(e) = self.store.remove(&Self::cache_key(question_id)) {
            tracing::warn!(question_id, error = %e, "Failed to clear cache entry");
        }
    }

    /// Removes every entry under [`CACHE_PREFIX`], leaving other keys alone.
    pub fn clear_all(&self) {
        let keys = match self.store.keys_with_prefix(CACHE_PREFIX) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list cache entries");
                return;
            }
        };

        let mut removed = 0;
        for key in &keys {
            match self.store.remove(key) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!(key = %key, error = %e, "Failed to clear cache entry"),
            }
        }

        tracing::info!(removed, "Cache cleared");
    }

    /// Every fresh entry, ordered by question id. Stale entries met along the
    /// way are evicted.
    pub fn entries(&self) -> Vec<CacheEntry> {
        let keys = match self.store.keys_with_prefix(CACHE_PREFIX) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list cache entries");
                return Vec::new();
            }
        };

        let mut entries: Vec<CacheEntry> = keys
            .iter()
            .filter_map(|key| key.strip_prefix(CACHE_PREFIX))
            .filter_map(|question_id| self.read(question_id))
            .collect();
        entries.sort_by(|a, b| a.question_id.cmp(&b.question_id));
        entries
    }

    /// Removes stale and corrupt entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let keys = match self.store.keys_with_prefix(CACHE_PREFIX) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list cache entries");
                return 0;
            }
        };

        let now = self.clock.now_millis();
        let mut purged = 0;

        for key in keys {
            let question_id = key.strip_prefix(CACHE_PREFIX).unwrap_or_default();
            let stale = match self.store.get(&key) {
                Ok(Some(raw)) => CacheEntry::from_json(question_id, &raw)
                    .map(|entry| entry.is_expired(now, Self::ttl_millis()))
                    .unwrap_or(true),
                Ok(None) => false,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Failed to read cache entry");
                    false
                }
            };

            if stale {
                let before = self.evictions.load(Ordering::Relaxed);
                self.evict(&key);
                if self.evictions.load(Ordering::Relaxed) > before {
                    purged += 1;
                }
            }
        }

        if purged > 0 {
            tracing::info!(purged, "Purged stale cache entries");
        }
        purged
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            stored: self
                .store
                .keys_with_prefix(CACHE_PREFIX)
                .map(|k| k.len())
                .unwrap_or(0),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}
