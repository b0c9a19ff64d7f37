use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

use crate::router::BindingState;

/// GET /health
pub async fn health_handler(State(state): State<BindingState>) -> impl IntoResponse {
    Json(json!({
        "status": "Binding Layer Active",
        "target": state.backend_url.as_str().trim_end_matches('/'),
    }))
}

/// GET /api/health/db -> round-trips the database clock.
pub async fn db_health_handler(State(state): State<BindingState>) -> impl IntoResponse {
    match state.storage.now().await {
        Ok(now) => (StatusCode::OK, Json(json!({ "ok": true, "now": now }))),
        Err(e) => {
            error!(error = %e, "database health probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            )
        }
    }
}
