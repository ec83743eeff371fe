//! Resolution of the active question identifier.

/// Identifier used when no question can be determined.
pub const DEFAULT_QUESTION_ID: &str = "Question Name";

/// Source of the current question identifier.
pub trait QuestionResolver: Send + Sync {
    /// Returns the current question id, or [`DEFAULT_QUESTION_ID`].
    fn current_question_id(&self) -> String;
}

/// Extracts the problem slug from a problem URL.
///
/// Query strings and fragments are ignored. When the path has a `problems`
/// segment, the segment after it is the slug
/// (`https://leetcode.com/problems/two-sum/description/` gives `two-sum`).
/// Otherwise the last non-empty segment is used.
pub fn question_id_from_url(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or_default(),
        None => without_query,
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.trim().is_empty()).collect();

    if let Some(pos) = segments.iter().position(|s| *s == "problems") {
        if let Some(slug) = segments.get(pos + 1) {
            return Some(slug.to_string());
        }
    }

    segments.last().map(|s| s.to_string())
}

/// Resolves the question from a problem URL, if one is known.
#[derive(Debug, Clone, Default)]
pub struct UrlQuestionResolver {
    url: Option<String>,
}

impl UrlQuestionResolver {
    /// Creates a resolver for `url`.
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

impl QuestionResolver for UrlQuestionResolver {
    fn current_question_id(&self) -> String {
        let resolved = self.url.as_deref().and_then(question_id_from_url);
        match resolved {
            Some(id) => {
                tracing::debug!(question_id = %id, "Question resolved from URL");
                id
            }
            None => DEFAULT_QUESTION_ID.to_string(),
        }
    }
}

/// Always returns the same question id.
#[derive(Debug, Clone)]
pub struct StaticQuestionResolver(pub String);

impl QuestionResolver for StaticQuestionResolver {
    fn current_question_id(&self) -> String {
        if self.0.trim().is_empty() {
            DEFAULT_QUESTION_ID.to_string()
        } else {
            self.0.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_urls() {
        assert_eq!(
            question_id_from_url("https://leetcode.com/problems/two-sum/").as_deref(),
            Some("two-sum")
        );
        assert_eq!(
            question_id_from_url("https://leetcode.com/problems/two-sum/description/?envType=daily")
                .as_deref(),
            Some("two-sum")
        );
        assert_eq!(
            question_id_from_url("https://leetcode.com/problems/lru-cache#top").as_deref(),
            Some("lru-cache")
        );
    }

    #[test]
    fn test_other_urls_use_last_segment() {
        // Trailing slash falls back to the previous segment
        assert_eq!(
            question_id_from_url("https://example.com/practice/valid-anagram/").as_deref(),
            Some("valid-anagram")
        );
        assert_eq!(question_id_from_url("merge-intervals").as_deref(), Some("merge-intervals"));
        assert_eq!(question_id_from_url("https://leetcode.com/"), None);
        assert_eq!(question_id_from_url("https://leetcode.com"), None);
        assert_eq!(question_id_from_url(""), None);
    }

    #[test]
    fn test_resolver_defaults() {
        assert_eq!(
            UrlQuestionResolver::default().current_question_id(),
            DEFAULT_QUESTION_ID
        );
        assert_eq!(
            UrlQuestionResolver::new(Some("https://leetcode.com/".into())).current_question_id(),
            DEFAULT_QUESTION_ID
        );
        assert_eq!(
            UrlQuestionResolver::new(Some("https://leetcode.com/problems/two-sum/".into()))
                .current_question_id(),
            "two-sum"
        );
        assert_eq!(
            StaticQuestionResolver("  ".into()).current_question_id(),
            DEFAULT_QUESTION_ID
        );
        assert_eq!(StaticQuestionResolver("3sum".into()).current_question_id(), "3sum");
    }
}
