//! Order ingestion: idempotent create-or-skip with affiliate attribution.

use crate::db::{Store, StoreError};
use crate::ingest::registration::AffiliateRegistrar;
use crate::domain::{Money, NewOrder, OrderEvent, PayoutStatus, TimeMs, ValidationError};
use std::sync::Arc;
use thiserror::Error;

/// What happened to an ingested event. Duplicates and unknown merchants are
/// designed no-ops, not failures: the webhook receiver treats all three as
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recorded,
    DuplicateOrder,
    UnknownMerchant,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid order event: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct OrderProcessor {
    store: Arc<dyn Store>,
    registrar: AffiliateRegistrar,
}

impl OrderProcessor {
    pub fn new(store: Arc<dyn Store>, registrar: AffiliateRegistrar) -> Self {
        Self { store, registrar }
    }

    /// Process one normalized order event.
    ///
    /// Safe under at-least-once delivery: the external order id is the
    /// idempotency key, checked up front and again enforced by the storage
    /// uniqueness constraint at insert time.
    pub async fn process_order(&self, event: &OrderEvent) -> Result<Outcome, IngestError> {
        event.validate()?;

        if self.store.order_exists(&event.order_id).await? {
            tracing::debug!(order_id = %event.order_id, "Duplicate order event, skipping");
            return Ok(Outcome::DuplicateOrder);
        }

        let merchant = match self.store.find_merchant_by_domain(&event.merchant_domain).await? {
            Some(m) => m,
            None => {
                tracing::warn!(
                    merchant_domain = %event.merchant_domain,
                    order_id = %event.order_id,
                    "Order event for unknown merchant domain, dropping"
                );
                return Ok(Outcome::UnknownMerchant);
            }
        };

        let affiliate = if event.discount_code.is_empty() {
            None
        } else {
            self.store
                .find_affiliate_by_code(merchant.id, &event.discount_code)
                .await?
        };

        // The purchaser always becomes an affiliate candidate for future
        // orders, whether or not this order itself was attributed.
        self.registrar
            .register(merchant.id, &event.customer_email, &event.customer_name)
            .await?;

        let commission_owed = match &affiliate {
            Some(a) => event.subtotal_price * a.commission_rate,
            None => Money::zero(),
        };

        let order = NewOrder {
            merchant_id: merchant.id,
            affiliate_id: affiliate.as_ref().map(|a| a.id),
            external_order_id: event.order_id.clone(),
            subtotal: event.subtotal_price,
            commission_owed,
            payout_status: PayoutStatus::Unpaid,
            customer_email: event.customer_email.clone(),
            customer_name: event.customer_name.clone(),
            discount_code: event.discount_code.clone(),
            created_at: TimeMs::now(),
        };

        if !self.store.insert_order(&order).await? {
            // Lost a uniqueness race against a concurrent duplicate delivery.
            tracing::debug!(order_id = %event.order_id, "Concurrent duplicate insert, skipping");
            return Ok(Outcome::DuplicateOrder);
        }

        tracing::info!(
            order_id = %event.order_id,
            merchant_id = merchant.id,
            affiliate_id = ?order.affiliate_id,
            commission_owed = %order.commission_owed,
            "Order recorded"
        );
        Ok(Outcome::Recorded)
    }
}
