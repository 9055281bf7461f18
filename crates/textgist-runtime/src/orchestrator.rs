//! Analyzer — decode, validate, call the LLM backend, extract keywords.
//!
//! Produces a complete [`NewAnalysis`] or fails; no partial results ever
//! leave this type. Keyword extraction runs on the normalized input and
//! has no data dependency on the provider call.

use std::sync::Arc;

use tracing::{debug, info, warn};

use textgist_analyze::{decode_request, extract_top_k, normalize};
use textgist_core::{Error, Result};
use textgist_llm::LlmBackend;
use textgist_store::NewAnalysis;

/// Keywords kept per analysis.
pub const TOP_KEYWORDS: usize = 3;

pub struct Analyzer {
    backend: Arc<dyn LlmBackend>,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Run the full analysis pipeline on a raw request body.
    pub async fn analyze(&self, raw_body: &[u8]) -> Result<NewAnalysis> {
        let payload = decode_request(raw_body)?;

        let raw_text = payload
            .get("text")
            .ok_or(Error::MissingField("text"))?
            .as_str()
            .ok_or_else(|| Error::Internal("'text' field is not a string".into()))?;

        let text = normalize(raw_text);
        if text.is_empty() {
            warn!("Empty text provided in analyze request");
            return Err(Error::EmptyInput);
        }
        info!("Received analyze request for text of length: {}", text.len());

        let analysis = self.backend.summarize_and_classify(&text).await?;
        let keywords = extract_top_k(&text, TOP_KEYWORDS);
        debug!("Extracted keywords: {:?}", keywords);

        Ok(NewAnalysis {
            input_text: text,
            summary: analysis.summary,
            title: analysis.title,
            topics: analysis.topics,
            sentiment: analysis.sentiment,
            keywords,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use textgist_llm::{Analysis, MockBackend};

    #[derive(Debug)]
    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn summarize_and_classify(&self, _text: &str) -> Result<Analysis> {
            Err(Error::LlmRequest("connection refused".into()))
        }
    }

    fn mock_analyzer() -> Analyzer {
        Analyzer::new(Arc::new(MockBackend))
    }

    #[tokio::test]
    async fn test_analyze_with_mock_backend() {
        let body = br#"{"text": "The quick brown fox jumps. The fox runs fast."}"#;
        let result = mock_analyzer().analyze(body).await.unwrap();

        assert_eq!(result.input_text, "The quick brown fox jumps. The fox runs fast.");
        assert_eq!(result.summary, result.input_text);
        assert_eq!(result.title, "Auto Summary");
        assert_eq!(result.sentiment, "neutral");
        assert_eq!(result.keywords, vec!["fox", "quick", "brown"]);
    }

    #[tokio::test]
    async fn test_analyze_repairs_malformed_body() {
        let body = br#"{"text": "He said "hi" to me"}"#;
        let result = mock_analyzer().analyze(body).await.unwrap();
        assert_eq!(result.input_text, r#"He said "hi" to me"#);
    }

    #[tokio::test]
    async fn test_missing_text_field() {
        let err = mock_analyzer().analyze(br#"{"foo": "bar"}"#).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("text")));
    }

    #[tokio::test]
    async fn test_empty_after_normalization() {
        let err = mock_analyzer().analyze(b"{\"text\": \" \\t \\n \"}").await.unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let analyzer = Analyzer::new(Arc::new(FailingBackend));
        let err = analyzer.analyze(br#"{"text": "hello"}"#).await.unwrap_err();
        assert!(matches!(err, Error::LlmRequest(_)));
    }

    #[tokio::test]
    async fn test_input_is_normalized_before_backend_call() {
        let body = "{\"text\": \"spaced \\u201Cout\\u201D   text\"}".as_bytes();
        let result = mock_analyzer().analyze(body).await.unwrap();
        assert_eq!(result.input_text, "spaced \"out\" text");
    }
}
