//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `merchants.rs` - Merchant provisioning and lookup
//! - `affiliates.rs` - Affiliate registration and discount-code matching
//! - `orders.rs` - Order insertion and range queries
//!
//! `Repository` also implements the `Store` capability trait consumed by the
//! ingestion and stats services.

mod affiliates;
mod merchants;
mod orders;

use crate::db::store::{RegisterOutcome, Store, StoreError};
use crate::domain::{Affiliate, AffiliateRegistration, Merchant, NewOrder, Order, TimeMs};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query, used by the readiness endpoint.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for Repository {
    async fn find_merchant_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<Merchant>, StoreError> {
        Ok(Repository::find_merchant_by_domain(self, domain).await?)
    }

    async fn find_affiliate_by_code(
        &self,
        merchant_id: i64,
        discount_code: &str,
    ) -> Result<Option<Affiliate>, StoreError> {
        Ok(Repository::find_affiliate_by_code(self, merchant_id, discount_code).await?)
    }

    async fn order_exists(&self, external_order_id: &str) -> Result<bool, StoreError> {
        Ok(Repository::order_exists(self, external_order_id).await?)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<bool, StoreError> {
        Ok(Repository::insert_order(self, order).await?)
    }

    async fn register_affiliate(
        &self,
        registration: &AffiliateRegistration,
    ) -> Result<RegisterOutcome, StoreError> {
        Ok(Repository::register_affiliate(self, registration).await?)
    }

    async fn orders_in_range(
        &self,
        merchant_id: i64,
        from: TimeMs,
        to: TimeMs,
    ) -> Result<Vec<Order>, StoreError> {
        Ok(Repository::orders_in_range(self, merchant_id, from, to).await?)
    }
}
