//! # Supplier Repository
//!
//! Database operations for suppliers, plus the list the medicine form's
//! supplier picker is filled from.
//!
//! The `(name, contact)` pair is unique. SQLite treats NULLs as distinct, so
//! two suppliers with the same name and no contact number can both exist.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pharmacy_core::{NewSupplier, Supplier, SupplierChoice};

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Inserts a supplier and returns it with its assigned id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation { field: Supplier }` - same name and contact
    pub async fn insert(&self, supplier: &NewSupplier) -> DbResult<Supplier> {
        debug!(name = %supplier.name, "Inserting supplier");

        let result = sqlx::query("INSERT INTO supplier (name, contact) VALUES (?1, ?2)")
            .bind(&supplier.name)
            .bind(&supplier.contact)
            .execute(&self.pool)
            .await?;

        Ok(Supplier {
            id: result.last_insert_rowid(),
            name: supplier.name.clone(),
            contact: supplier.contact.clone(),
        })
    }

    /// Gets a supplier by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, contact FROM supplier WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Lists every supplier in id order.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, contact FROM supplier ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Supplier picker entries, ordered by name.
    ///
    /// Each entry renders as `"id: name"` via [`SupplierChoice::label`].
    pub async fn choices(&self) -> DbResult<Vec<SupplierChoice>> {
        let choices = sqlx::query_as::<_, SupplierChoice>(
            "SELECT id, name FROM supplier ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DbError, UniqueField};
    use crate::repository::test_support::test_db;

    fn new_supplier(name: &str, contact: Option<&str>) -> NewSupplier {
        NewSupplier {
            name: name.to_string(),
            contact: contact.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_choices_are_sorted_by_name() {
        let db = test_db().await;
        let repo = db.suppliers();

        let zeta = repo.insert(&new_supplier("Zeta Pharma", None)).await.unwrap();
        let acme = repo
            .insert(&new_supplier("Acme Labs", Some("0123456789")))
            .await
            .unwrap();

        let labels: Vec<String> = repo
            .choices()
            .await
            .unwrap()
            .iter()
            .map(SupplierChoice::label)
            .collect();

        assert_eq!(
            labels,
            vec![
                format!("{}: Acme Labs", acme.id),
                format!("{}: Zeta Pharma", zeta.id)
            ]
        );

        // Listing stays in id order
        let listed: Vec<i64> = repo.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(listed, vec![zeta.id, acme.id]);
    }

    #[tokio::test]
    async fn test_duplicate_name_and_contact_refused() {
        let db = test_db().await;
        let repo = db.suppliers();

        repo.insert(&new_supplier("Acme", Some("0123456789")))
            .await
            .unwrap();
        let err = repo
            .insert(&new_supplier("Acme", Some("0123456789")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::UniqueViolation {
                field: UniqueField::Supplier
            }
        ));

        // Different contact is a different supplier
        repo.insert(&new_supplier("Acme", Some("9999999999")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_same_name_without_contact_refused() {
        let db = test_db().await;
        let repo = db.suppliers();

        let acme = repo.insert(&new_supplier("Acme", None)).await.unwrap();
        let err = repo.insert(&new_supplier("Acme", None)).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::UniqueViolation {
                field: UniqueField::Supplier
            }
        ));
        assert_eq!(repo.list().await.unwrap(), vec![acme.clone()]);
        assert_eq!(repo.get_by_id(acme.id).await.unwrap(), Some(acme));

        // A contact makes it a different supplier
        repo.insert(&new_supplier("Acme", Some("0123456789")))
            .await
            .unwrap();
    }
}
