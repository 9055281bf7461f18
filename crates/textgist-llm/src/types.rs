//! Provider output contract.

use serde::{Deserialize, Serialize};

/// Normalized result every backend produces.
///
/// `summary` and `title` are required in provider output; `topics` and
/// `sentiment` default when a provider omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub title: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default = "default_sentiment")]
    pub sentiment: String,
}

fn default_sentiment() -> String {
    "neutral".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_on_missing_fields() {
        let analysis: Analysis =
            serde_json::from_str(r#"{"summary": "s", "title": "t"}"#).unwrap();
        assert!(analysis.topics.is_empty());
        assert_eq!(analysis.sentiment, "neutral");
    }

    #[test]
    fn test_missing_summary_is_an_error() {
        let result: Result<Analysis, _> = serde_json::from_str(r#"{"title": "t"}"#);
        assert!(result.is_err());
    }
}
