use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::AppState;
use crate::domain::OrderEvent;
use crate::error::AppError;
use crate::ingest::Outcome;

/// Ingest one order webhook.
///
/// Always answers 202 for well-formed payloads: duplicate deliveries and
/// unknown merchant domains are designed no-ops, so the upstream receiver
/// never needs to retry them. Malformed payloads get a 4xx and are expected
/// to be corrected upstream, not redelivered as-is.
pub async fn ingest_order(
    State(state): State<AppState>,
    Json(event): Json<OrderEvent>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let outcome = state.processor.process_order(&event).await?;

    let outcome_str = match outcome {
        Outcome::Recorded => "recorded",
        Outcome::DuplicateOrder => "duplicate",
        Outcome::UnknownMerchant => "unknown_merchant",
    };

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "status": "accepted",
            "outcome": outcome_str,
        })),
    ))
}
