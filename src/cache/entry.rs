//! Cached record for one question.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::fields::FieldKind;

/// Every generated text cached for one question, sharing one timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Question identifier (problem slug).
    pub question_id: String,

    /// Most recent text per field kind.
    pub fields: BTreeMap<FieldKind, String>,

    /// Epoch milliseconds of the most recent write to any field.
    pub timestamp: i64,
}

impl CacheEntry {
    /// Creates an entry with no fields.
    pub fn new(question_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            question_id: question_id.into(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    /// Text stored for `field`, if any. Empty strings are returned as-is.
    pub fn field(&self, field: FieldKind) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Age of the entry relative to `now_millis`.
    pub fn age_millis(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.timestamp)
    }

    /// Whether the entry is older than `ttl_millis`. Age equal to the TTL is fresh.
    pub fn is_expired(&self, now_millis: i64, ttl_millis: i64) -> bool {
        self.age_millis(now_millis) > ttl_millis
    }

    pub(crate) fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&StoredEntry::from(self))
    }

    /// Stored layout, indented for display.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&StoredEntry::from(self))
    }

    pub(crate) fn from_json(question_id: &str, raw: &str) -> serde_json::Result<Self> {
        let stored: StoredEntry = serde_json::from_str(raw)?;
        Ok(stored.into_entry(question_id))
    }
}

/// On-disk layout: flat optional fields plus `timestamp`. Unknown keys are ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dry_run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mistakes: Option<String>,
    timestamp: i64,
}

impl StoredEntry {
    fn slot(&mut self, field: FieldKind) -> &mut Option<String> {
        match field {
            FieldKind::Explanation => &mut self.explanation,
            FieldKind::Solution => &mut self.solution,
            FieldKind::Hints => &mut self.hints,
            FieldKind::DryRun => &mut self.dry_run,
            FieldKind::Mistakes => &mut self.mistakes,
        }
    }

    fn into_entry(mut self, question_id: &str) -> CacheEntry {
        let mut entry = CacheEntry::new(question_id, self.timestamp);
        for field in FieldKind::ALL {
            if let Some(value) = self.slot(field).take() {
                entry.fields.insert(field, value);
            }
        }
        entry
    }
}

impl From<&CacheEntry> for StoredEntry {
    fn from(entry: &CacheEntry) -> Self {
        let mut stored = StoredEntry {
            timestamp: entry.timestamp,
            ..Default::default()
        };
        for (field, value) in &entry.fields {
            *stored.slot(*field) = Some(value.clone());
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let mut entry = CacheEntry::new("two-sum", 1_700_000_000_000);
        entry.fields.insert(FieldKind::DryRun, "step 1".to_string());
        entry.fields.insert(FieldKind::Hints, String::new());

        let json: serde_json::Value = serde_json::from_str(&entry.to_json().unwrap()).unwrap();
        assert_eq!(json["dryRun"], "step 1");
        assert_eq!(json["hints"], "");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert!(json.get("solution").is_none());
        assert!(json.get("question_id").is_none());
    }

    #[test]
    fn test_tolerates_unknown_and_missing_fields() {
        let raw = r#"{"solution":"S1","timestamp":42,"theme":"dark"}"#;
        let entry = CacheEntry::from_json("two-sum", raw).unwrap();

        assert_eq!(entry.question_id, "two-sum");
        assert_eq!(entry.field(FieldKind::Solution), Some("S1"));
        assert_eq!(entry.field(FieldKind::Hints), None);
        assert_eq!(entry.timestamp, 42);
    }

    #[test]
    fn test_missing_timestamp_is_corrupt() {
        assert!(CacheEntry::from_json("q", r#"{"hints":"H"}"#).is_err());
        assert!(CacheEntry::from_json("q", "not json").is_err());
        assert!(CacheEntry::from_json("q", r#"{"hints":5,"timestamp":1}"#).is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let entry = CacheEntry::new("q", 1_000);
        assert!(!entry.is_expired(1_100, 100));
        assert!(entry.is_expired(1_101, 100));
        // Timestamp ahead of the clock is not expired
        assert!(!entry.is_expired(500, 100));
    }
}
