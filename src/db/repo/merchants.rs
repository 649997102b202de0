//! Merchant provisioning and lookup.

use super::Repository;
use crate::domain::Merchant;
use sqlx::Row;

impl Repository {
    /// Insert a merchant. Returns the created record, or None when the
    /// domain is already taken.
    pub async fn insert_merchant(
        &self,
        domain: &str,
        name: &str,
    ) -> Result<Option<Merchant>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO merchants (domain, name)
            VALUES (?, ?)
            ON CONFLICT(domain) DO NOTHING
            "#,
        )
        .bind(domain)
        .bind(name)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Merchant {
            id: result.last_insert_rowid(),
            domain: domain.to_string(),
            name: name.to_string(),
        }))
    }

    /// Resolve a merchant by its storefront domain.
    pub async fn find_merchant_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<Merchant>, sqlx::Error> {
        let row = sqlx::query("SELECT id, domain, name FROM merchants WHERE domain = ?")
            .bind(domain)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(|r| Merchant {
            id: r.get("id"),
            domain: r.get("domain"),
            name: r.get("name"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::db::migrations::init_db;
    use crate::db::Repository;
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

    #[tokio::test]
    async fn test_insert_and_find_merchant() {
        let (repo, _temp) = setup_test_db().await;

        let merchant = repo
            .insert_merchant("shop.example.com", "Example Shop")
            .await
            .unwrap()
            .expect("insert returned None");

        let found = repo
            .find_merchant_by_domain("shop.example.com")
            .await
            .unwrap()
            .expect("merchant not found");
        assert_eq!(found, merchant);
    }

    #[tokio::test]
    async fn test_duplicate_domain_returns_none() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_merchant("shop.example.com", "First")
            .await
            .unwrap();
        let second = repo
            .insert_merchant("shop.example.com", "Second")
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_unknown_domain_not_found() {
        let (repo, _temp) = setup_test_db().await;

        let found = repo.find_merchant_by_domain("nope.example.com").await.unwrap();
        assert!(found.is_none());
    }
}
