//! Health/status route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let count = state.store.count_analyses().unwrap_or(0);
    Json(serde_json::json!({
        "status": "healthy",
        "service": "textgist",
        "llmClient": state.config.llm.client.to_string(),
        "analyses": count,
    }))
}
