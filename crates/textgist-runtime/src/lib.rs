//! TextGist Runtime — composes the analysis pipeline.

pub mod orchestrator;

pub use orchestrator::{Analyzer, TOP_KEYWORDS};
