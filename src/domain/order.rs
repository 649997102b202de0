//! Order records and the inbound webhook payload.

use crate::domain::money::Money;
use crate::domain::primitives::TimeMs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payout lifecycle of an order's commission. Orders are created `Unpaid`;
/// payout transitions happen outside ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Unpaid,
    Paid,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Unpaid => "unpaid",
            PayoutStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unpaid" => Some(PayoutStatus::Unpaid),
            "paid" => Some(PayoutStatus::Paid),
            _ => None,
        }
    }
}

/// A persisted order. Immutable after creation as far as ingestion is
/// concerned; read-only input to the stats aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: i64,
    pub merchant_id: i64,
    /// The affiliate credited for this order, if the submitted discount
    /// code matched one. Must belong to the same merchant.
    pub affiliate_id: Option<i64>,
    /// Idempotency key supplied by the upstream storefront.
    pub external_order_id: String,
    pub subtotal: Money,
    /// `subtotal * commission_rate` for attributed orders, 0 otherwise.
    pub commission_owed: Money,
    pub payout_status: PayoutStatus,
    pub customer_email: String,
    pub customer_name: String,
    /// Stored exactly as submitted, even when it matched no affiliate.
    pub discount_code: String,
    pub created_at: TimeMs,
}

/// Input for persisting a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub merchant_id: i64,
    pub affiliate_id: Option<i64>,
    pub external_order_id: String,
    pub subtotal: Money,
    pub commission_owed: Money,
    pub payout_status: PayoutStatus,
    pub customer_email: String,
    pub customer_name: String,
    pub discount_code: String,
    pub created_at: TimeMs,
}

/// Normalized order payload from the upstream webhook receiver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderEvent {
    pub order_id: String,
    pub subtotal_price: Money,
    pub merchant_domain: String,
    /// May be empty or absent; an unmatched code is a normal organic order.
    #[serde(default)]
    pub discount_code: String,
    pub customer_email: String,
    pub customer_name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("subtotal_price must not be negative")]
    NegativeSubtotal,
}

impl OrderEvent {
    /// Check field shape before any side effects. Serde already enforces
    /// presence and numeric types; this rejects empty keys and negative
    /// amounts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.order_id.trim().is_empty() {
            return Err(ValidationError::Empty("order_id"));
        }
        if self.merchant_domain.trim().is_empty() {
            return Err(ValidationError::Empty("merchant_domain"));
        }
        if self.customer_email.trim().is_empty() {
            return Err(ValidationError::Empty("customer_email"));
        }
        if self.subtotal_price.is_negative() {
            return Err(ValidationError::NegativeSubtotal);
        }
        Ok(())
    }
}
