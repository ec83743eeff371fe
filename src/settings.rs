//! Settings kept in the shared store, outside the cache namespace.

use crate::storage::KeyValueStore;
use crate::LeetHelperResult;

/// Key holding the model API key.
pub const API_KEY_KEY: &str = "gemini_api_key";

/// Returns the stored API key, if any.
pub fn api_key<S: KeyValueStore + ?Sized>(store: &S) -> LeetHelperResult<Option<String>> {
    store.get(API_KEY_KEY)
}

/// Stores the API key. A blank key removes it.
pub fn set_api_key<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> LeetHelperResult<()> {
    if key.trim().is_empty() {
        tracing::info!("API key removed");
        store.remove(API_KEY_KEY)
    } else {
        tracing::info!("API key stored");
        store.set(API_KEY_KEY, key)
    }
}

/// Whether a non-blank API key is stored. Store errors count as "no key".
pub fn has_valid_api_key<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    matches!(api_key(store), Ok(Some(key)) if !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ResponseCache, CACHE_PREFIX};
    use crate::storage::MemoryStore;
    use crate::types::fields::FieldKind;
    use std::sync::Arc;

    #[test]
    fn test_set_and_remove_api_key() {
        let store = MemoryStore::new();
        assert!(!has_valid_api_key(&store));

        set_api_key(&store, "abc123").unwrap();
        assert!(has_valid_api_key(&store));
        assert_eq!(api_key(&store).unwrap().as_deref(), Some("abc123"));

        set_api_key(&store, "   ").unwrap();
        assert!(!has_valid_api_key(&store));
        assert!(store.is_empty());
    }

    #[test]
    fn test_api_key_survives_cache_clear_all() {
        assert!(!API_KEY_KEY.starts_with(CACHE_PREFIX));

        let store = Arc::new(MemoryStore::new());
        let cache = ResponseCache::new(Arc::clone(&store));
        set_api_key(&*store, "abc123").unwrap();
        cache.set("two-sum", FieldKind::Hints, "H");

        cache.clear_all();

        assert!(has_valid_api_key(&*store));
        assert_eq!(store.len(), 1);
    }
}
