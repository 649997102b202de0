use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::Merchant;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateMerchantRequest {
    pub domain: String,
    #[serde(default)]
    pub name: String,
}

/// Provision a merchant. Order events for a domain are silently dropped
/// until the merchant exists.
pub async fn create_merchant(
    State(state): State<AppState>,
    Json(req): Json<CreateMerchantRequest>,
) -> Result<(StatusCode, Json<Merchant>), AppError> {
    if req.domain.trim().is_empty() {
        return Err(AppError::BadRequest("domain must not be empty".into()));
    }

    let merchant = state
        .repo
        .insert_merchant(req.domain.trim(), &req.name)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("merchant domain {} already exists", req.domain))
        })?;

    Ok((StatusCode::CREATED, Json(merchant)))
}
