//! TextGist LLM — summarize-and-classify over interchangeable backends.
//!
//! One backend is selected from configuration at startup via
//! [`create_backend`]; callers only ever see the [`LlmBackend`] trait
//! and the uniform [`Analysis`] output contract.

pub mod prompt;
pub mod providers;
pub mod types;

pub use providers::{create_backend, LlmBackend, MockBackend};
pub use types::Analysis;
