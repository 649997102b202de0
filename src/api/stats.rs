use axum::extract::{Query, State};
use axum::Json;
use chrono::DateTime;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::TimeMs;
use crate::error::AppError;
use crate::stats::OrderStats;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Merchant storefront domain. Stands in for the authenticated merchant
    /// an outer auth layer would resolve.
    pub merchant: String,
    pub from: String,
    pub to: String,
}

fn parse_instant(field: &str, value: &str) -> Result<TimeMs, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| TimeMs::new(dt.timestamp_millis()))
        .map_err(|_| {
            AppError::BadRequest(format!("{} must be an RFC 3339 timestamp", field))
        })
}

/// Order statistics for a merchant over the closed interval `[from, to]`.
///
/// An inverted interval is not an error; the service answers all zeros.
pub async fn get_order_stats(
    Query(params): Query<StatsQuery>,
    State(state): State<AppState>,
) -> Result<Json<OrderStats>, AppError> {
    let from = parse_instant("from", &params.from)?;
    let to = parse_instant("to", &params.to)?;

    let merchant = state
        .repo
        .find_merchant_by_domain(&params.merchant)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no merchant with domain {}", params.merchant)))?;

    let stats = state.stats.order_stats(merchant.id, from, to).await?;
    Ok(Json(stats))
}
