//! Categories of generated text kept per question.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LeetHelperError;

/// One of the five categories of generated text cached per question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Plain-language explanation of the problem statement.
    Explanation,
    /// Full solution in the requested language.
    Solution,
    /// Progressive hints.
    Hints,
    /// Step-by-step dry run of a solution.
    DryRun,
    /// Analysis of mistakes in the user's own code.
    Mistakes,
}

impl FieldKind {
    /// Every field kind, in display order.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Explanation,
        FieldKind::Solution,
        FieldKind::Hints,
        FieldKind::DryRun,
        FieldKind::Mistakes,
    ];

    /// Name used in the persisted JSON record.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Explanation => "explanation",
            FieldKind::Solution => "solution",
            FieldKind::Hints => "hints",
            FieldKind::DryRun => "dryRun",
            FieldKind::Mistakes => "mistakes",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = LeetHelperError;

    /// Accepts the persisted names plus the snake/kebab spellings of `dryRun`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explanation" | "explain" => Ok(FieldKind::Explanation),
            "solution" => Ok(FieldKind::Solution),
            "hints" | "hint" => Ok(FieldKind::Hints),
            "dryrun" | "dry_run" | "dry-run" => Ok(FieldKind::DryRun),
            "mistakes" | "analysis" => Ok(FieldKind::Mistakes),
            _ => Err(LeetHelperError::InvalidField(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("dryRun".parse::<FieldKind>().unwrap(), FieldKind::DryRun);
        assert_eq!("dry-run".parse::<FieldKind>().unwrap(), FieldKind::DryRun);
        assert_eq!(" Hints ".parse::<FieldKind>().unwrap(), FieldKind::Hints);
        assert_eq!("analysis".parse::<FieldKind>().unwrap(), FieldKind::Mistakes);
    }

    #[test]
    fn test_parse_invalid_fails_fast() {
        let err = "timestamp".parse::<FieldKind>().unwrap_err();
        assert!(matches!(err, LeetHelperError::InvalidField(ref f) if f == "timestamp"));
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for field in FieldKind::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }
}
