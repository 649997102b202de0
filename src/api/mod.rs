pub mod health;
pub mod merchants;
pub mod stats;
pub mod webhooks;

use crate::db::Repository;
use crate::ingest::OrderProcessor;
use crate::stats::StatsService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub processor: Arc<OrderProcessor>,
    pub stats: Arc<StatsService>,
}

impl AppState {
    pub fn new(
        repo: Arc<Repository>,
        processor: Arc<OrderProcessor>,
        stats: Arc<StatsService>,
    ) -> Self {
        Self {
            repo,
            processor,
            stats,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/webhooks/orders", post(webhooks::ingest_order))
        .route("/v1/stats", get(stats::get_order_stats))
        .route("/v1/merchants", post(merchants::create_merchant))
        .layer(cors)
        .with_state(state)
}
