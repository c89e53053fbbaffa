//! # Stock Repository
//!
//! One stock row per medicine, keyed by `medicine_id`.
//!
//! ## Set vs Sell
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set(medicine_id, qty)          SaleRepository::record(..)              │
//! │       │                               │                                 │
//! │       ▼                               ▼                                 │
//! │  row absent?  INSERT  → Created   quantity = quantity - sold           │
//! │  row present? UPDATE  → Updated   (never below zero)                   │
//! │                                                                         │
//! │  Both stamp last_updated with the day of the change.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use pharmacy_core::{LowStockRow, Stock, StockAction};

/// Repository for stock database operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Gets the stock row of a medicine.
    pub async fn get(&self, medicine_id: i64) -> DbResult<Option<Stock>> {
        let stock = sqlx::query_as::<_, Stock>(
            "SELECT medicine_id, quantity, last_updated FROM stock WHERE medicine_id = ?1",
        )
        .bind(medicine_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock)
    }

    /// Sets the absolute stock quantity of a medicine.
    ///
    /// Creates the row if the medicine has none, otherwise overwrites
    /// quantity and `last_updated`.
    ///
    /// ## Errors
    /// * `DbError::NotFound { entity: "Medicine", .. }` - medicine id unknown
    pub async fn set(
        &self,
        medicine_id: i64,
        quantity: i64,
        on: NaiveDate,
    ) -> DbResult<StockAction> {
        debug!(medicine_id, quantity, "Setting stock");

        let mut tx = self.pool.begin().await?;

        let medicine: Option<i64> = sqlx::query_scalar("SELECT id FROM medicine WHERE id = ?1")
            .bind(medicine_id)
            .fetch_optional(&mut *tx)
            .await?;
        if medicine.is_none() {
            return Err(DbError::not_found("Medicine", medicine_id));
        }

        let updated = sqlx::query(
            "UPDATE stock SET quantity = ?1, last_updated = ?2 WHERE medicine_id = ?3",
        )
        .bind(quantity)
        .bind(on)
        .bind(medicine_id)
        .execute(&mut *tx)
        .await?;

        let action = if updated.rows_affected() > 0 {
            StockAction::Updated
        } else {
            sqlx::query(
                "INSERT INTO stock (medicine_id, quantity, last_updated) VALUES (?1, ?2, ?3)",
            )
            .bind(medicine_id)
            .bind(quantity)
            .bind(on)
            .execute(&mut *tx)
            .await?;
            StockAction::Created
        };

        tx.commit().await?;

        info!(medicine_id, quantity, action = action.as_str(), "Stock set");
        Ok(action)
    }

    /// Lists every stock row in medicine id order.
    pub async fn list(&self) -> DbResult<Vec<Stock>> {
        let rows = sqlx::query_as::<_, Stock>(
            "SELECT medicine_id, quantity, last_updated FROM stock ORDER BY medicine_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Stock rows with `quantity < threshold`, lowest quantity first.
    ///
    /// Each row carries the medicine's brand. Ties keep medicine id order.
    /// Stock rows whose medicine no longer exists are left out.
    pub async fn list_low_stock(&self, threshold: i64) -> DbResult<Vec<LowStockRow>> {
        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT s.medicine_id, m.brand, s.quantity, s.last_updated
            FROM stock s
            JOIN medicine m ON s.medicine_id = m.id
            WHERE s.quantity < ?1
            ORDER BY s.quantity ASC, s.medicine_id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        debug!(threshold, count = rows.len(), "Low stock query");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{date, seed_medicine, test_db};

    #[tokio::test]
    async fn test_set_creates_then_updates() {
        let db = test_db().await;
        let id = seed_medicine(&db, "Aspirin", 250).await;
        let repo = db.stock();

        let action = repo.set(id, 10, date("2025-06-01")).await.unwrap();
        assert_eq!(action, StockAction::Created);

        let action = repo.set(id, 4, date("2025-06-02")).await.unwrap();
        assert_eq!(action, StockAction::Updated);

        let stock = repo.get(id).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 4);
        assert_eq!(stock.last_updated, date("2025-06-02"));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_zero_is_allowed() {
        let db = test_db().await;
        let id = seed_medicine(&db, "Aspirin", 250).await;

        db.stock().set(id, 0, date("2025-06-01")).await.unwrap();
        assert_eq!(db.stock().get(id).await.unwrap().unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn test_set_for_unknown_medicine_is_refused() {
        let db = test_db().await;

        let err = db.stock().set(404, 10, date("2025-06-01")).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Medicine"));
        assert!(db.stock().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_low_stock_is_strictly_below_and_sorted() {
        let db = test_db().await;
        let day = date("2025-06-01");

        let a = seed_medicine(&db, "A", 100).await;
        let b = seed_medicine(&db, "B", 100).await;
        let c = seed_medicine(&db, "C", 100).await;
        let d = seed_medicine(&db, "D", 100).await;

        db.stock().set(a, 3, day).await.unwrap();
        db.stock().set(b, 10, day).await.unwrap();
        db.stock().set(c, 0, day).await.unwrap();
        db.stock().set(d, 5, day).await.unwrap();

        let rows = db.stock().list_low_stock(5).await.unwrap();

        let summary: Vec<(i64, &str, i64)> = rows
            .iter()
            .map(|r| (r.medicine_id, r.brand.as_str(), r.quantity))
            .collect();
        assert_eq!(summary, vec![(c, "C", 0), (a, "A", 3)]);
        assert!(rows.iter().all(|r| r.last_updated == day));
    }

    #[tokio::test]
    async fn test_low_stock_empty_cases() {
        let db = test_db().await;
        assert!(db.stock().list_low_stock(5).await.unwrap().is_empty());

        let id = seed_medicine(&db, "A", 100).await;
        db.stock().set(id, 0, date("2025-06-01")).await.unwrap();

        // Nothing is strictly below zero
        assert!(db.stock().list_low_stock(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_low_stock_is_restartable() {
        let db = test_db().await;
        let id = seed_medicine(&db, "A", 100).await;
        db.stock().set(id, 1, date("2025-06-01")).await.unwrap();

        let first = db.stock().list_low_stock(5).await.unwrap();
        let second = db.stock().list_low_stock(5).await.unwrap();
        assert_eq!(first, second);
    }
}
