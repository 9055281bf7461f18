//! Search route — substring search over stored topics and keywords.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::{error_response, AnalysisResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", get(search))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    topic: Option<String>,
}

/// Search analyses by topic. Matches both the topic and keyword fields.
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let term = params.topic.unwrap_or_default();
    if term.is_empty() {
        warn!("No topic provided in search request");
        return (StatusCode::OK, Json(json!([])));
    }

    info!("Received search request for topic: {}", term);
    match state.store.search_analyses(&term) {
        Ok(records) => {
            info!("Found {} matching analyses", records.len());
            let results: Vec<AnalysisResponse> = records.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(serde_json::to_value(results).unwrap()))
        }
        Err(e) => error_response(&e),
    }
}
