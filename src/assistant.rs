//! Cache-or-generate workflow used by every front end.

use crate::cache::{Clock, ResponseCache, SystemClock};
use crate::generator::{build_prompt, Generator, PromptRequest};
use crate::storage::KeyValueStore;
use crate::types::fields::FieldKind;
use crate::LeetHelperResult;

/// Serves generated text from the cache, asking the generator on a miss.
pub struct Assistant<S, G, C = SystemClock> {
    cache: ResponseCache<S, C>,
    generator: G,
}

impl<S, G, C> Assistant<S, G, C>
where
    S: KeyValueStore,
    G: Generator,
    C: Clock,
{
    /// Creates an assistant.
    pub fn new(cache: ResponseCache<S, C>, generator: G) -> Self {
        Self { cache, generator }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &ResponseCache<S, C> {
        &self.cache
    }

    /// The underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Cached text for one field, without generating.
    pub fn cached(&self, question_id: &str, field: FieldKind) -> Option<String> {
        self.cache.get_field(question_id, field)
    }

    /// Returns the text for `request`.
    ///
    /// Uses the cached value unless `refresh` is set. On a miss the prompt is
    /// sent to the generator and the result is cached only if generation
    /// succeeded. Generator errors are returned; cache errors never are.
    pub async fn fetch(&self, request: &PromptRequest, refresh: bool) -> LeetHelperResult<String> {
        if !refresh {
            if let Some(text) = self.cached(&request.question_id, request.field) {
                tracing::debug!(question_id = %request.question_id, field = %request.field, "Serving from cache");
                return Ok(text);
            }
        }

        let prompt = build_prompt(request);
        tracing::info!(
            question_id = %request.question_id,
            field = %request.field,
            generator = self.generator.name(),
            "Generating"
        );

        let text = self.generator.generate(&prompt).await?;
        self.cache.set(&request.question_id, request.field, text.clone());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::storage::MemoryStore;
    use crate::LeetHelperError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGenerator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingGenerator {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl Generator for CountingGenerator {
        fn name(&self) -> &str {
            "counting"
        }

        async fn generate(&self, prompt: &str) -> LeetHelperResult<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(LeetHelperError::GeneratorFailed(
                    "counting".to_string(),
                    "unauthorized".to_string(),
                ));
            }
            Ok(format!("response {} ({} chars)", n, prompt.len()))
        }
    }

    fn assistant(fail: bool) -> Assistant<MemoryStore, CountingGenerator, ManualClock> {
        let cache = ResponseCache::with_clock(MemoryStore::new(), ManualClock::new(0));
        Assistant::new(cache, CountingGenerator::new(fail))
    }

    #[tokio::test]
    async fn test_miss_generates_then_hits_cache() {
        let assistant = assistant(false);
        let request = PromptRequest::new("two-sum", FieldKind::Hints);

        let first = assistant.fetch(&request, false).await.unwrap();
        let second = assistant.fetch(&request, false).await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("response 1"));
        assert_eq!(assistant.generator().calls.load(Ordering::SeqCst), 1);
        assert_eq!(assistant.cached("two-sum", FieldKind::Hints), Some(first));
    }

    #[tokio::test]
    async fn test_refresh_regenerates() {
        let assistant = assistant(false);
        let request = PromptRequest::new("two-sum", FieldKind::Solution);

        assistant.fetch(&request, false).await.unwrap();
        let refreshed = assistant.fetch(&request, true).await.unwrap();

        assert!(refreshed.starts_with("response 2"));
        assert_eq!(assistant.cached("two-sum", FieldKind::Solution), Some(refreshed));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let assistant = assistant(true);
        let request = PromptRequest::new("two-sum", FieldKind::Explanation);

        assert!(assistant.fetch(&request, false).await.is_err());
        assert!(assistant.cache().get("two-sum").is_none());
        assert!(assistant.cache().store().is_empty());
    }

    #[tokio::test]
    async fn test_cached_empty_string_is_served() {
        let assistant = assistant(false);
        assistant.cache().set("two-sum", FieldKind::DryRun, "");

        let text = assistant
            .fetch(&PromptRequest::new("two-sum", FieldKind::DryRun), false)
            .await
            .unwrap();

        assert_eq!(text, "");
        assert_eq!(assistant.generator().calls.load(Ordering::SeqCst), 0);
    }
}
