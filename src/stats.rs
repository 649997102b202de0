//! Per-merchant order statistics over a closed date range.

use crate::db::{Store, StoreError};
use crate::domain::{Money, TimeMs};
use serde::Serialize;
use std::sync::Arc;

/// Aggregate figures over a merchant's in-range orders. Field names are part
/// of the API contract and must stay exactly as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub count: i64,
    pub revenue: Money,
    pub commissions_owed: Money,
}

impl OrderStats {
    pub fn empty() -> Self {
        OrderStats {
            count: 0,
            revenue: Money::zero(),
            commissions_owed: Money::zero(),
        }
    }
}

pub struct StatsService {
    store: Arc<dyn Store>,
}

impl StatsService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Compute count, revenue and outstanding commission for a merchant's
    /// orders with `created_at` in `[from, to]` (inclusive both ends).
    ///
    /// All three figures come from one fetched row set, so they can never
    /// disagree about which orders were in range. A degenerate interval
    /// (`from > to`) yields all zeros rather than an error. Sums are done in
    /// Rust with Decimal; SQLite's SUM degrades to floating point.
    pub async fn order_stats(
        &self,
        merchant_id: i64,
        from: TimeMs,
        to: TimeMs,
    ) -> Result<OrderStats, StoreError> {
        if from > to {
            return Ok(OrderStats::empty());
        }

        let orders = self.store.orders_in_range(merchant_id, from, to).await?;

        let mut revenue = Money::zero();
        let mut commissions_owed = Money::zero();
        for order in &orders {
            revenue = revenue + order.subtotal;
            // Unattributed orders are excluded structurally, not just
            // zero-valued.
            if order.affiliate_id.is_some() {
                commissions_owed = commissions_owed + order.commission_owed;
            }
        }

        Ok(OrderStats {
            count: orders.len() as i64,
            revenue,
            commissions_owed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_stats_shape() {
        let stats = OrderStats::empty();
        assert_eq!(stats.count, 0);
        assert!(stats.revenue.is_zero());
        assert!(stats.commissions_owed.is_zero());
    }

    #[test]
    fn test_stats_serializes_contract_field_names() {
        let stats = OrderStats {
            count: 2,
            revenue: Money::from_str("250").unwrap(),
            commissions_owed: Money::from_str("20").unwrap(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["commissions_owed", "count", "revenue"]);
        assert_eq!(json["count"], 2);
        assert_eq!(json["revenue"], 250.0);
        assert_eq!(json["commissions_owed"], 20.0);
    }
}
