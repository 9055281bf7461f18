//! Shared application state.

use std::sync::Arc;

use textgist_core::TextGistConfig;
use textgist_llm::LlmBackend;
use textgist_runtime::Analyzer;
use textgist_store::SqliteStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: TextGistConfig,
    pub store: SqliteStore,
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(config: TextGistConfig, store: SqliteStore, backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            config,
            store,
            analyzer: Analyzer::new(backend),
        }
    }
}
