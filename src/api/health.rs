//! Liveness and readiness endpoints.

use crate::api::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

/// Liveness: the process is up and serving requests.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Readiness: the service can reach its database. Without storage it can
/// neither ingest orders nor serve stats, so a failed check answers 503.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match state.repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"status": "ready"})),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"status": "unavailable"})),
            )
        }
    }
}
