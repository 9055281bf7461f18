//! LLM backend implementations.
//!
//! All providers share the prompt construction `"{template}\n{text}"`
//! and the single-shot request model: any failure at any stage (network,
//! non-2xx status, envelope shape, non-conforming content) surfaces as
//! [`Error::LlmRequest`] and nothing else. No retries here — a failed
//! call fails once, immediately.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use textgist_core::{Error, LlmClient, LlmSettings, Result};

use crate::prompt::load_prompt;
use crate::types::Analysis;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const CLAUDE_MAX_TOKENS: u32 = 1000;
const OLLAMA_TIMEOUT: Duration = Duration::from_secs(60);

/// Characters of input echoed back by the mock summary.
pub const MOCK_SUMMARY_CHARS: usize = 200;
pub const MOCK_TITLE: &str = "Auto Summary";
pub const MOCK_TOPIC: &str = "General";

/// A summarize-and-classify capable LLM backend.
#[async_trait]
pub trait LlmBackend: Send + Sync + std::fmt::Debug {
    async fn summarize_and_classify(&self, text: &str) -> Result<Analysis>;
}

/// Build the backend selected by configuration.
///
/// Selection happens exactly once here; a missing API key for a remote
/// variant is a startup configuration error.
pub fn create_backend(settings: &LlmSettings) -> Result<Arc<dyn LlmBackend>> {
    match settings.client {
        LlmClient::Mock => {
            info!("Using mock LLM backend");
            Ok(Arc::new(MockBackend))
        }
        LlmClient::OpenAi => {
            let api_key = settings
                .openai
                .api_key
                .clone()
                .ok_or_else(|| Error::Config("OpenAI API key not configured".into()))?;
            info!("Using OpenAI backend with model: {}", settings.openai.model);
            Ok(Arc::new(OpenAiBackend {
                client: Client::new(),
                api_key,
                model: settings.openai.model.clone(),
                prompt: load_prompt(&settings.prompt_file),
            }))
        }
        LlmClient::Claude => {
            let api_key = settings
                .claude
                .api_key
                .clone()
                .ok_or_else(|| Error::Config("Claude API key not configured".into()))?;
            info!("Using Claude backend with model: {}", settings.claude.model);
            Ok(Arc::new(ClaudeBackend {
                client: Client::new(),
                api_key,
                model: settings.claude.model.clone(),
                prompt: load_prompt(&settings.prompt_file),
            }))
        }
        LlmClient::Ollama => {
            let client = Client::builder()
                .timeout(OLLAMA_TIMEOUT)
                .build()
                .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
            info!(
                "Using Ollama backend with model: {} at {}",
                settings.ollama.model, settings.ollama.base_url
            );
            Ok(Arc::new(OllamaBackend {
                client,
                base_url: settings.ollama.base_url.trim_end_matches('/').to_string(),
                model: settings.ollama.model.clone(),
                prompt: load_prompt(&settings.prompt_file),
            }))
        }
    }
}

// ---------------------------------------------------------------
// Mock
// ---------------------------------------------------------------

/// Offline backend for dev runs; also the fallback for unrecognized
/// configuration.
#[derive(Debug)]
pub struct MockBackend;

#[async_trait]
impl LlmBackend for MockBackend {
    async fn summarize_and_classify(&self, text: &str) -> Result<Analysis> {
        debug!("Generating mock response for text analysis");
        let mut summary: String = text.chars().take(MOCK_SUMMARY_CHARS).collect();
        if text.chars().count() > MOCK_SUMMARY_CHARS {
            summary.push_str("...");
        }
        Ok(Analysis {
            summary,
            title: MOCK_TITLE.into(),
            topics: vec![MOCK_TOPIC.into()],
            sentiment: "neutral".into(),
        })
    }
}

// ---------------------------------------------------------------
// OpenAI
// ---------------------------------------------------------------

#[derive(Debug)]
pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    model: String,
    prompt: String,
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn summarize_and_classify(&self, text: &str) -> Result<Analysis> {
        info!("Analyzing text with OpenAI model: {}", self.model);
        debug!("Text length: {} characters", text.len());

        let prompt = format!("{}\n{}", self.prompt, text);
        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{"role": "user", "content": prompt}],
                "response_format": {"type": "json_object"},
            }))
            .send()
            .await
            .map_err(|e| Error::LlmRequest(e.to_string()))?;

        let envelope = read_json_envelope(response, "OpenAI").await?;
        parse_openai_envelope(&envelope)
    }
}

// ---------------------------------------------------------------
// Claude
// ---------------------------------------------------------------

#[derive(Debug)]
pub struct ClaudeBackend {
    client: Client,
    api_key: String,
    model: String,
    prompt: String,
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    async fn summarize_and_classify(&self, text: &str) -> Result<Analysis> {
        info!("Analyzing text with Claude model: {}", self.model);
        debug!("Text length: {} characters", text.len());

        let prompt = format!("{}\n{}", self.prompt, text);
        let response = self
            .client
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": CLAUDE_MAX_TOKENS,
                "messages": [{"role": "user", "content": prompt}],
            }))
            .send()
            .await
            .map_err(|e| Error::LlmRequest(e.to_string()))?;

        let envelope = read_json_envelope(response, "Claude").await?;
        parse_claude_envelope(&envelope)
    }
}

// ---------------------------------------------------------------
// Ollama
// ---------------------------------------------------------------

#[derive(Debug)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
    prompt: String,
}

#[async_trait]
impl LlmBackend for OllamaBackend {
    async fn summarize_and_classify(&self, text: &str) -> Result<Analysis> {
        info!(
            "Analyzing text with Ollama model: {} at {}",
            self.model, self.base_url
        );
        debug!("Text length: {} characters", text.len());

        let prompt = format!("{}\n{}", self.prompt, text);
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "format": "json",
            }))
            .send()
            .await
            .map_err(|e| Error::LlmRequest(e.to_string()))?;

        let envelope = read_json_envelope(response, "Ollama").await?;
        parse_ollama_envelope(&envelope)
    }
}

// ---------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------

async fn read_json_envelope(response: reqwest::Response, provider: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::LlmRequest(format!(
            "{} API error {}: {}",
            provider, status, body
        )));
    }
    response
        .json()
        .await
        .map_err(|e| Error::LlmRequest(format!("{} returned invalid JSON: {}", provider, e)))
}

fn parse_openai_envelope(envelope: &Value) -> Result<Analysis> {
    let content = envelope["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| Error::LlmRequest("OpenAI response missing message content".into()))?;
    parse_analysis(content)
}

fn parse_claude_envelope(envelope: &Value) -> Result<Analysis> {
    let content = envelope["content"][0]["text"]
        .as_str()
        .ok_or_else(|| Error::LlmRequest("Claude response missing content text".into()))?;
    parse_analysis(content)
}

/// Ollama wraps the generated text in a `response` field, which itself
/// holds the JSON-encoded analysis.
fn parse_ollama_envelope(envelope: &Value) -> Result<Analysis> {
    let content = envelope["response"]
        .as_str()
        .ok_or_else(|| Error::LlmRequest("Ollama response missing 'response' field".into()))?;
    parse_analysis(content)
}

fn parse_analysis(content: &str) -> Result<Analysis> {
    serde_json::from_str(content)
        .map_err(|e| Error::LlmRequest(format!("Provider returned non-conforming analysis: {}", e)))
}
