//! Service configuration.
//!
//! Built once in `main` via [`TextGistConfig::from_env`] and passed by
//! reference into the components that need it. There is no global
//! settings lookup anywhere else in the workspace.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";

/// Which LLM backend the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmClient {
    Mock,
    OpenAi,
    Claude,
    Ollama,
}

impl LlmClient {
    /// Parse the `LLM_CLIENT` selector. Unknown values fall back to Mock.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "mock" => LlmClient::Mock,
            "openai" => LlmClient::OpenAi,
            "claude" => LlmClient::Claude,
            "ollama" => LlmClient::Ollama,
            other => {
                warn!("Unknown LLM client: {}, falling back to mock", other);
                LlmClient::Mock
            }
        }
    }
}

impl std::fmt::Display for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmClient::Mock => write!(f, "mock"),
            LlmClient::OpenAi => write!(f, "openai"),
            LlmClient::Claude => write!(f, "claude"),
            LlmClient::Ollama => write!(f, "ollama"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeSettings {
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
}

/// LLM backend selection plus per-variant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub client: LlmClient,
    pub openai: OpenAiSettings,
    pub claude: ClaudeSettings,
    pub ollama: OllamaSettings,
    /// Prompt template file; the hard-coded fallback is used when missing.
    pub prompt_file: PathBuf,
}

/// Top-level TextGist configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGistConfig {
    /// HTTP server port.
    pub port: u16,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// LLM backend settings.
    pub llm: LlmSettings,
}

impl TextGistConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let client = LlmClient::from_tag(
            &std::env::var("LLM_CLIENT").unwrap_or_else(|_| "mock".into()),
        );

        let llm = LlmSettings {
            client,
            openai: OpenAiSettings {
                api_key: std::env::var("OPENAI_API_KEY").ok(),
                model: std::env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into()),
            },
            claude: ClaudeSettings {
                api_key: std::env::var("CLAUDE_API_KEY").ok(),
                model: std::env::var("CLAUDE_MODEL")
                    .unwrap_or_else(|_| DEFAULT_CLAUDE_MODEL.into()),
            },
            ollama: OllamaSettings {
                base_url: std::env::var("LLAMA_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.into()),
                model: std::env::var("LLAMA_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.into()),
            },
            prompt_file: std::env::var("TEXTGIST_PROMPT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("prompts.txt")),
        };

        Ok(Self {
            port,
            database_path: data_dir.join("textgist.db"),
            llm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_tag() {
        assert_eq!(LlmClient::from_tag("openai"), LlmClient::OpenAi);
        assert_eq!(LlmClient::from_tag("CLAUDE"), LlmClient::Claude);
        assert_eq!(LlmClient::from_tag("ollama"), LlmClient::Ollama);
        assert_eq!(LlmClient::from_tag("mock"), LlmClient::Mock);
    }

    #[test]
    fn test_unknown_client_falls_back_to_mock() {
        assert_eq!(LlmClient::from_tag("bedrock"), LlmClient::Mock);
        assert_eq!(LlmClient::from_tag(""), LlmClient::Mock);
    }
}
