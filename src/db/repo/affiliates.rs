//! Affiliate registration and discount-code matching.

use super::Repository;
use crate::db::store::RegisterOutcome;
use crate::domain::{Affiliate, AffiliateRegistration, Rate};
use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::warn;

fn affiliate_from_row(row: &SqliteRow) -> Affiliate {
    let rate_str: String = row.get("commission_rate");
    let commission_rate = Rate::from_str(&rate_str).unwrap_or_else(|e| {
        warn!(
            commission_rate = %rate_str,
            error = %e,
            "Failed to parse affiliate commission rate, using zero"
        );
        Rate::zero()
    });

    Affiliate {
        id: row.get("id"),
        merchant_id: row.get("merchant_id"),
        customer_email: row.get("customer_email"),
        customer_name: row.get("customer_name"),
        discount_code: row.get("discount_code"),
        commission_rate,
    }
}

impl Repository {
    /// Insert an affiliate idempotently by `(merchant_id, customer_email)`.
    ///
    /// An email conflict leaves the existing row untouched, so a previously
    /// assigned custom commission rate is never overwritten by the default.
    /// A unique violation here can only come from the merchant's
    /// `discount_code` uniqueness (the email conflict is absorbed by the
    /// ON CONFLICT clause); it is reported as `CodeTaken`, not an error, so
    /// callers can pick another code.
    pub async fn register_affiliate(
        &self,
        registration: &AffiliateRegistration,
    ) -> Result<RegisterOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO affiliates (merchant_id, customer_email, customer_name, discount_code, commission_rate)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(merchant_id, customer_email) DO NOTHING
            "#,
        )
        .bind(registration.merchant_id)
        .bind(&registration.customer_email)
        .bind(&registration.customer_name)
        .bind(&registration.discount_code)
        .bind(registration.commission_rate.to_canonical_string())
        .execute(self.pool())
        .await;

        match result {
            Ok(r) if r.rows_affected() > 0 => Ok(RegisterOutcome::Created),
            Ok(_) => Ok(RegisterOutcome::AlreadyRegistered),
            Err(sqlx::Error::Database(e)) if matches!(e.kind(), ErrorKind::UniqueViolation) => {
                Ok(RegisterOutcome::CodeTaken)
            }
            Err(e) => Err(e),
        }
    }

    /// Find the affiliate owning `discount_code` within a merchant's scope.
    ///
    /// `(merchant_id, discount_code)` is unique in storage, so at most one
    /// row can match.
    pub async fn find_affiliate_by_code(
        &self,
        merchant_id: i64,
        discount_code: &str,
    ) -> Result<Option<Affiliate>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, merchant_id, customer_email, customer_name, discount_code, commission_rate
            FROM affiliates
            WHERE merchant_id = ? AND discount_code = ?
            "#,
        )
        .bind(merchant_id)
        .bind(discount_code)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(|r| affiliate_from_row(&r)))
    }

    /// Find an affiliate by email within a merchant's scope.
    pub async fn find_affiliate_by_email(
        &self,
        merchant_id: i64,
        customer_email: &str,
    ) -> Result<Option<Affiliate>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, merchant_id, customer_email, customer_name, discount_code, commission_rate
            FROM affiliates
            WHERE merchant_id = ? AND customer_email = ?
            "#,
        )
        .bind(merchant_id)
        .bind(customer_email)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(|r| affiliate_from_row(&r)))
    }

    /// Number of affiliates registered for a merchant.
    pub async fn count_affiliates(&self, merchant_id: i64) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM affiliates WHERE merchant_id = ?")
            .bind(merchant_id)
            .fetch_one(self.pool())
            .await?;
        Ok(row.get("n"))
    }
}
