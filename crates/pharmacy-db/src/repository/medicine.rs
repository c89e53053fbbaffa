//! # Medicine Repository
//!
//! Database operations for the medicine catalogue.
//!
//! ## Delete Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete(id)                                                             │
//! │       │                                                                 │
//! │       ▼   BEGIN                                                         │
//! │  DELETE FROM stock    WHERE medicine_id = id                           │
//! │  DELETE FROM medicine WHERE id = id                                    │
//! │       │   COMMIT                                                        │
//! │       ▼                                                                 │
//! │  Both rows gone, or neither. Sales rows are kept as history.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use pharmacy_core::{Medicine, NewMedicine};

/// Repository for medicine database operations.
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Inserts a medicine and returns it with its assigned id.
    ///
    /// ## Errors
    /// * `DbError::NotFound { entity: "Supplier", .. }` - supplier id unknown
    pub async fn insert(&self, medicine: &NewMedicine) -> DbResult<Medicine> {
        debug!(
            brand = %medicine.brand,
            supplier_id = ?medicine.supplier_id,
            price_cents = medicine.price.cents(),
            "Inserting medicine"
        );

        let mut tx = self.pool.begin().await?;

        let supplier: Option<i64> = match medicine.supplier_id {
            Some(id) => {
                sqlx::query_scalar("SELECT id FROM supplier WHERE id = ?1")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };
        let Some(supplier_id) = supplier else {
            let id = medicine
                .supplier_id
                .map_or_else(|| "none".to_string(), |id| id.to_string());
            return Err(DbError::not_found("Supplier", id));
        };

        let result = sqlx::query(
            r#"
            INSERT INTO medicine (supplier_id, brand, price_cents, expiry_date, manufacture_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(supplier_id)
        .bind(&medicine.brand)
        .bind(medicine.price.cents())
        .bind(medicine.expiry_date)
        .bind(medicine.manufacture_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Medicine {
            id: result.last_insert_rowid(),
            supplier_id,
            brand: medicine.brand.clone(),
            price_cents: medicine.price.cents(),
            expiry_date: medicine.expiry_date,
            manufacture_date: medicine.manufacture_date,
        })
    }

    /// Gets a medicine by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT id, supplier_id, brand, price_cents, expiry_date, manufacture_date
            FROM medicine
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Lists every medicine in id order.
    pub async fn list(&self) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT id, supplier_id, brand, price_cents, expiry_date, manufacture_date
            FROM medicine
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Deletes a medicine and its stock row in one transaction.
    ///
    /// A missing id removes nothing and is not an error. Returns the number
    /// of medicine rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;

        let stock = sqlx::query("DELETE FROM stock WHERE medicine_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let medicine = sqlx::query("DELETE FROM medicine WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            id,
            medicine_rows = medicine.rows_affected(),
            stock_rows = stock.rows_affected(),
            "Medicine deleted"
        );

        Ok(medicine.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{date, seed_medicine, test_db};
    use pharmacy_core::Money;

    #[tokio::test]
    async fn test_insert_round_trips_dates_and_price() {
        let db = test_db().await;
        let id = seed_medicine(&db, "Aspirin", 250).await;

        let medicine = db.medicines().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(medicine.brand, "Aspirin");
        assert_eq!(medicine.price(), Money::from_cents(250));
        assert_eq!(medicine.expiry_date, date("2027-01-01"));
        assert_eq!(medicine.manufacture_date, date("2025-01-01"));
    }

    #[tokio::test]
    async fn test_insert_with_unknown_supplier_is_refused() {
        let db = test_db().await;

        let err = db
            .medicines()
            .insert(&NewMedicine {
                supplier_id: Some(77),
                brand: "Ghost".to_string(),
                price: Money::from_cents(100),
                expiry_date: date("2027-01-01"),
                manufacture_date: date("2025-01-01"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Supplier"));
        assert!(db.medicines().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_stock_row_too() {
        let db = test_db().await;
        let id = seed_medicine(&db, "Aspirin", 250).await;
        db.stock().set(id, 10, date("2025-06-01")).await.unwrap();

        assert_eq!(db.medicines().delete(id).await.unwrap(), 1);

        assert!(db.medicines().get_by_id(id).await.unwrap().is_none());
        assert!(db.stock().get(id).await.unwrap().is_none());

        // Second delete is a no-op
        assert_eq!(db.medicines().delete(id).await.unwrap(), 0);
    }
}
