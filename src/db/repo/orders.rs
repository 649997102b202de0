//! Order insertion and range queries.

use super::Repository;
use crate::domain::{Money, NewOrder, Order, PayoutStatus, TimeMs};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::warn;

fn money_column(row: &SqliteRow, column: &str) -> Money {
    let raw: String = row.get(column);
    Money::from_str(&raw).unwrap_or_else(|e| {
        warn!(column, value = %raw, error = %e, "Failed to parse order amount, using zero");
        Money::zero()
    })
}

fn order_from_row(row: &SqliteRow) -> Order {
    let status_str: String = row.get("payout_status");
    let payout_status = PayoutStatus::parse(&status_str).unwrap_or_else(|| {
        warn!(payout_status = %status_str, "Unknown payout status, treating as unpaid");
        PayoutStatus::Unpaid
    });

    Order {
        id: row.get("id"),
        merchant_id: row.get("merchant_id"),
        affiliate_id: row.get("affiliate_id"),
        external_order_id: row.get("external_order_id"),
        subtotal: money_column(row, "subtotal"),
        commission_owed: money_column(row, "commission_owed"),
        payout_status,
        customer_email: row.get("customer_email"),
        customer_name: row.get("customer_name"),
        discount_code: row.get("discount_code"),
        created_at: TimeMs::new(row.get("created_at")),
    }
}

impl Repository {
    /// Whether any order exists with this external id, across merchants.
    pub async fn order_exists(&self, external_order_id: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM orders WHERE external_order_id = ? LIMIT 1")
            .bind(external_order_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.is_some())
    }

    /// Insert an order idempotently.
    ///
    /// The `(merchant_id, external_order_id)` uniqueness constraint is the
    /// arbiter for concurrent duplicate deliveries: the loser of the race
    /// gets zero rows affected and must treat that as a no-op.
    pub async fn insert_order(&self, order: &NewOrder) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders
            (merchant_id, affiliate_id, external_order_id, subtotal, commission_owed,
             payout_status, customer_email, customer_name, discount_code, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(merchant_id, external_order_id) DO NOTHING
            "#,
        )
        .bind(order.merchant_id)
        .bind(order.affiliate_id)
        .bind(&order.external_order_id)
        .bind(order.subtotal.to_canonical_string())
        .bind(order.commission_owed.to_canonical_string())
        .bind(order.payout_status.as_str())
        .bind(&order.customer_email)
        .bind(&order.customer_name)
        .bind(&order.discount_code)
        .bind(order.created_at.as_i64())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find an order by its external id.
    pub async fn find_order_by_external_id(
        &self,
        external_order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, merchant_id, affiliate_id, external_order_id, subtotal,
                   commission_owed, payout_status, customer_email, customer_name,
                   discount_code, created_at
            FROM orders
            WHERE external_order_id = ?
            LIMIT 1
            "#,
        )
        .bind(external_order_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(|r| order_from_row(&r)))
    }

    /// A merchant's orders with `created_at` in the closed interval
    /// `[from, to]`, oldest first.
    pub async fn orders_in_range(
        &self,
        merchant_id: i64,
        from: TimeMs,
        to: TimeMs,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, merchant_id, affiliate_id, external_order_id, subtotal,
                   commission_owed, payout_status, customer_email, customer_name,
                   discount_code, created_at
            FROM orders
            WHERE merchant_id = ? AND created_at >= ? AND created_at <= ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(merchant_id)
        .bind(from.as_i64())
        .bind(to.as_i64())
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(order_from_row).collect())
    }

    /// Number of order rows carrying this external id.
    pub async fn count_orders_by_external_id(
        &self,
        external_order_id: &str,
    ) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM orders WHERE external_order_id = ?")
            .bind(external_order_id)
            .fetch_one(self.pool())
            .await?;
        Ok(row.get("n"))
    }
}

#[cfg(test)]
mod tests {
    use crate::db::migrations::init_db;
    use crate::db::Repository;
    use crate::domain::{Money, NewOrder, PayoutStatus, TimeMs};
    use std::str::FromStr;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    fn new_order(merchant_id: i64, external_id: &str, subtotal: &str, created_at: i64) -> NewOrder {
        NewOrder {
            merchant_id,
            affiliate_id: None,
            external_order_id: external_id.to_string(),
            subtotal: Money::from_str(subtotal).unwrap(),
            commission_owed: Money::zero(),
            payout_status: PayoutStatus::Unpaid,
            customer_email: "buyer@example.com".to_string(),
            customer_name: "Buyer".to_string(),
            discount_code: String::new(),
            created_at: TimeMs::new(created_at),
        }
    }

    async fn merchant(repo: &Repository, domain: &str) -> i64 {
        repo.insert_merchant(domain, "").await.unwrap().unwrap().id
    }

    #[tokio::test]
    async fn test_insert_duplicate_order_ignored() {
        let (repo, _temp) = setup_test_db().await;
        let m = merchant(&repo, "shop.example.com").await;

        let inserted1 = repo.insert_order(&new_order(m, "ord_1", "10", 1000)).await.unwrap();
        let inserted2 = repo.insert_order(&new_order(m, "ord_1", "99", 2000)).await.unwrap();

        assert!(inserted1);
        assert!(!inserted2);
        assert_eq!(repo.count_orders_by_external_id("ord_1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_order_exists() {
        let (repo, _temp) = setup_test_db().await;
        let m = merchant(&repo, "shop.example.com").await;

        assert!(!repo.order_exists("ord_1").await.unwrap());
        repo.insert_order(&new_order(m, "ord_1", "10", 1000)).await.unwrap();
        assert!(repo.order_exists("ord_1").await.unwrap());
    }

    #[tokio::test]
    async fn test_orders_in_range_bounds_are_inclusive() {
        let (repo, _temp) = setup_test_db().await;
        let m = merchant(&repo, "shop.example.com").await;

        for (id, at) in [("ord_1", 1000), ("ord_2", 2000), ("ord_3", 3000)] {
            repo.insert_order(&new_order(m, id, "10", at)).await.unwrap();
        }

        let orders = repo
            .orders_in_range(m, TimeMs::new(1000), TimeMs::new(2000))
            .await
            .unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].external_order_id, "ord_1");
        assert_eq!(orders[1].external_order_id, "ord_2");
    }

    #[tokio::test]
    async fn test_orders_in_range_scoped_to_merchant() {
        let (repo, _temp) = setup_test_db().await;
        let m1 = merchant(&repo, "one.example.com").await;
        let m2 = merchant(&repo, "two.example.com").await;

        repo.insert_order(&new_order(m1, "ord_a", "10", 1000)).await.unwrap();
        repo.insert_order(&new_order(m2, "ord_b", "20", 1000)).await.unwrap();

        let orders = repo
            .orders_in_range(m1, TimeMs::new(0), TimeMs::new(5000))
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].external_order_id, "ord_a");
    }

    #[tokio::test]
    async fn test_order_roundtrip_preserves_fields() {
        let (repo, _temp) = setup_test_db().await;
        let m = merchant(&repo, "shop.example.com").await;

        let mut order = new_order(m, "ord_1", "19.99", 1234);
        order.discount_code = "SAVE10".to_string();
        repo.insert_order(&order).await.unwrap();

        let stored = repo
            .find_order_by_external_id("ord_1")
            .await
            .unwrap()
            .expect("order not found");
        assert_eq!(stored.subtotal, Money::from_str("19.99").unwrap());
        assert_eq!(stored.discount_code, "SAVE10");
        assert_eq!(stored.payout_status, PayoutStatus::Unpaid);
        assert_eq!(stored.created_at, TimeMs::new(1234));
        assert!(stored.affiliate_id.is_none());
    }
}
