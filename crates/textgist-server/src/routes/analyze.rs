//! Analyze route — the full text → LLM → keywords → store pipeline.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use super::{error_response, AnalysisResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analyze", post(analyze))
}

/// Analyze the text and return summary and metadata.
///
/// The body is taken raw so the tolerant decoder can repair malformed
/// JSON before anything else looks at it. Failed analyses are never
/// persisted.
async fn analyze(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let analysis = match state.analyzer.analyze(&body).await {
        Ok(analysis) => analysis,
        Err(e) => return error_response(&e),
    };

    info!("Saving analysis to database");
    match state.store.save_analysis(&analysis) {
        Ok(record) => {
            info!("Analysis saved with ID: {}", record.id);
            (
                StatusCode::OK,
                Json(serde_json::to_value(AnalysisResponse::from(record)).unwrap()),
            )
        }
        Err(e) => error_response(&e),
    }
}
