//! Storage capabilities consumed by the ingestion and stats services.
//!
//! The trait carries exactly what the core needs, so the business logic is
//! not bound to the SQLite implementation in `repo`.

use crate::domain::{Affiliate, AffiliateRegistration, Merchant, NewOrder, Order, TimeMs};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Result of an affiliate registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new affiliate row was created.
    Created,
    /// The `(merchant_id, customer_email)` pair already exists; the existing
    /// row was left untouched.
    AlreadyRegistered,
    /// Another affiliate of the same merchant already owns the requested
    /// discount code. Nothing was written.
    CodeTaken,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Resolve a merchant by its storefront domain.
    async fn find_merchant_by_domain(&self, domain: &str)
        -> Result<Option<Merchant>, StoreError>;

    /// Find the affiliate owning `discount_code` within a merchant's scope.
    async fn find_affiliate_by_code(
        &self,
        merchant_id: i64,
        discount_code: &str,
    ) -> Result<Option<Affiliate>, StoreError>;

    /// Whether any order exists with this external id, across merchants.
    async fn order_exists(&self, external_order_id: &str) -> Result<bool, StoreError>;

    /// Insert an order. Returns false when a uniqueness conflict on the
    /// external id means a concurrent duplicate already won.
    async fn insert_order(&self, order: &NewOrder) -> Result<bool, StoreError>;

    /// Insert an affiliate, idempotent by `(merchant_id, customer_email)`.
    /// An existing affiliate is left untouched, including its commission
    /// rate. A clash on the merchant's discount-code uniqueness reports
    /// `CodeTaken` instead of failing.
    async fn register_affiliate(
        &self,
        registration: &AffiliateRegistration,
    ) -> Result<RegisterOutcome, StoreError>;

    /// A merchant's orders with `created_at` in the closed interval
    /// `[from, to]`.
    async fn orders_in_range(
        &self,
        merchant_id: i64,
        from: TimeMs,
        to: TimeMs,
    ) -> Result<Vec<Order>, StoreError>;
}
