//! Error types for TextGist.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request body is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Invalid JSON format: {0}")]
    MalformedRequest(String),

    #[error("Missing '{0}' field")]
    MissingField(&'static str),

    #[error("Input text is required")]
    EmptyInput,

    #[error("LLM request failed: {0}")]
    LlmRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error is the caller's fault (maps to a 4xx response).
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Error::Encoding(_) | Error::MalformedRequest(_) | Error::MissingField(_) | Error::EmptyInput
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
