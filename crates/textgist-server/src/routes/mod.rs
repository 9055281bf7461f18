//! HTTP route handlers.

pub mod analyze;
pub mod search;
pub mod status;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;
use textgist_core::Error;
use textgist_store::AnalysisRecord;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(analyze::routes())
        .merge(search::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Response shape for a persisted analysis. `input_text` stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub id: i64,
    pub summary: String,
    pub title: String,
    pub topics: Vec<String>,
    pub sentiment: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AnalysisRecord> for AnalysisResponse {
    fn from(record: AnalysisRecord) -> Self {
        Self {
            id: record.id,
            summary: record.summary,
            title: record.title,
            topics: record.topics,
            sentiment: record.sentiment,
            keywords: record.keywords,
            created_at: record.created_at,
        }
    }
}

/// Map a pipeline error to an HTTP response.
///
/// Client faults carry their message; server faults log the cause and
/// return a generic body.
pub(crate) fn error_response(err: &Error) -> (StatusCode, Json<serde_json::Value>) {
    if err.is_client_fault() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": err.to_string() })));
    }
    match err {
        Error::LlmRequest(cause) => {
            error!("LLM analysis failed: {}", cause);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "LLM request failed" })),
            )
        }
        other => {
            error!("Unexpected error in request handling: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
        }
    }
}
