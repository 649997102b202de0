//! Merchant and affiliate records.

use crate::domain::money::Rate;
use serde::{Deserialize, Serialize};

/// A tenant whose storefront orders flow through the system.
///
/// `domain` is the unique lookup key for inbound order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: i64,
    pub domain: String,
    pub name: String,
}

/// A party eligible to earn commission on a merchant's orders via a
/// discount code. Belongs to exactly one merchant; the discount code is
/// unique within that merchant's scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliate {
    pub id: i64,
    pub merchant_id: i64,
    pub customer_email: String,
    pub customer_name: String,
    pub discount_code: String,
    pub commission_rate: Rate,
}

/// Input for creating an affiliate through the registrar. Insertion is
/// idempotent by `(merchant_id, customer_email)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateRegistration {
    pub merchant_id: i64,
    pub customer_email: String,
    pub customer_name: String,
    pub discount_code: String,
    pub commission_rate: Rate,
}
