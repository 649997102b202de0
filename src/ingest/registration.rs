//! Affiliate self-registration.
//!
//! Every purchaser is registered as a prospective affiliate for future
//! orders. Registration is idempotent by `(merchant, email)`: repeats create
//! no duplicate row and never replace an existing commission rate with the
//! default.

use crate::db::{RegisterOutcome, Store, StoreError};
use crate::domain::{AffiliateRegistration, Rate};
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub struct AffiliateRegistrar {
    store: Arc<dyn Store>,
    default_rate: Rate,
}

impl AffiliateRegistrar {
    pub fn new(store: Arc<dyn Store>, default_rate: Rate) -> Self {
        Self {
            store,
            default_rate,
        }
    }

    /// Register `(email, name)` as an affiliate of the merchant at the
    /// default rate. Returns whether a new affiliate was created.
    ///
    /// If another affiliate of the merchant already owns the derived code,
    /// the registration retries once with a longer digest suffix. A second
    /// clash is logged and skipped; it must never fail the order that
    /// triggered the registration.
    pub async fn register(
        &self,
        merchant_id: i64,
        customer_email: &str,
        customer_name: &str,
    ) -> Result<bool, StoreError> {
        for digest_bytes in [SHORT_SUFFIX_BYTES, LONG_SUFFIX_BYTES] {
            let registration = AffiliateRegistration {
                merchant_id,
                customer_email: customer_email.to_string(),
                customer_name: customer_name.to_string(),
                discount_code: code_with_suffix(customer_name, customer_email, digest_bytes),
                commission_rate: self.default_rate,
            };

            match self.store.register_affiliate(&registration).await? {
                RegisterOutcome::Created => {
                    tracing::info!(
                        merchant_id,
                        customer_email,
                        discount_code = %registration.discount_code,
                        "Registered purchaser as affiliate"
                    );
                    return Ok(true);
                }
                RegisterOutcome::AlreadyRegistered => return Ok(false),
                RegisterOutcome::CodeTaken => {
                    tracing::warn!(
                        merchant_id,
                        customer_email,
                        discount_code = %registration.discount_code,
                        "Derived discount code already taken, widening suffix"
                    );
                }
            }
        }

        tracing::warn!(
            merchant_id,
            customer_email,
            "Could not assign a unique discount code, skipping registration"
        );
        Ok(false)
    }
}

const SHORT_SUFFIX_BYTES: usize = 3;
const LONG_SUFFIX_BYTES: usize = 8;

/// Derive a discount code from the customer name plus a short digest of the
/// lowercased email. Deterministic, so re-registering the same person always
/// produces the same code, and distinct emails get distinct codes within a
/// merchant.
pub fn derive_discount_code(customer_name: &str, customer_email: &str) -> String {
    code_with_suffix(customer_name, customer_email, SHORT_SUFFIX_BYTES)
}

fn code_with_suffix(customer_name: &str, customer_email: &str, digest_bytes: usize) -> String {
    let slug: String = customer_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(12)
        .collect::<String>()
        .to_ascii_uppercase();
    let slug = if slug.is_empty() { "AFF".to_string() } else { slug };

    let digest = Sha256::digest(customer_email.trim().to_ascii_lowercase().as_bytes());
    let suffix = hex::encode(&digest[..digest_bytes]).to_ascii_uppercase();

    format!("{}-{}", slug, suffix)
}
