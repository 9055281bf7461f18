//! TextGist Core — error taxonomy and service configuration.

pub mod config;
pub mod error;

pub use config::{ClaudeSettings, LlmClient, LlmSettings, OllamaSettings, OpenAiSettings, TextGistConfig};
pub use error::{Error, Result};
