//! # Sale Repository
//!
//! Records sales and keeps stock in step with them.
//!
//! ## Sale Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record(NewSale)                                   │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │   1. medicine row     ── missing ──► NotFound("Medicine")             │
//! │   2. stock row        ── missing ──► NotFound("Stock record")         │
//! │   3. quantity check   ── short ────► InsufficientStock                │
//! │   4. total = price × quantity                                          │
//! │   5. INSERT INTO sales                                                 │
//! │   6. UPDATE stock ... WHERE quantity >= sold                           │
//! │        └── 0 rows ──► ROLLBACK, InsufficientStock                     │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure after BEGIN drops the transaction: no sale row and no     │
//! │  stock change survive.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The customer id is stored as given; it is not checked against the
//! customer table.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use pharmacy_core::{CoreError, Medicine, NewSale, Sale, Stock};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale dated today. See [`SaleRepository::record_on`].
    pub async fn record(&self, sale: NewSale) -> DbResult<Sale> {
        self.record_on(sale, crate::today()).await
    }

    /// Records a sale and decrements stock, atomically.
    ///
    /// ## Returns
    /// The stored sale, with `total_cents = price_cents × quantity` at the
    /// medicine's price at the time of sale.
    ///
    /// ## Errors
    /// * `DbError::NotFound { entity: "Medicine", .. }` - unknown medicine
    /// * `DbError::NotFound { entity: "Stock record", .. }` - medicine has no stock row
    /// * `DbError::Rejected(CoreError::InsufficientStock { .. })` - not enough units
    ///
    /// On any error nothing is written.
    pub async fn record_on(&self, sale: NewSale, on: NaiveDate) -> DbResult<Sale> {
        debug!(
            customer_id = sale.customer_id,
            medicine_id = sale.medicine_id,
            quantity = sale.quantity,
            "Recording sale"
        );

        let mut tx = self.pool.begin().await?;

        let medicine = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT id, supplier_id, brand, price_cents, expiry_date, manufacture_date
            FROM medicine
            WHERE id = ?1
            "#,
        )
        .bind(sale.medicine_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Medicine", sale.medicine_id))?;

        let stock = sqlx::query_as::<_, Stock>(
            "SELECT medicine_id, quantity, last_updated FROM stock WHERE medicine_id = ?1",
        )
        .bind(sale.medicine_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Stock record", sale.medicine_id))?;

        stock.ensure_available(sale.quantity)?;
        let total = medicine.total_for(sale.quantity)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO sales (customer_id, medicine_id, sale_date, quantity, total_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(sale.customer_id)
        .bind(sale.medicine_id)
        .bind(on)
        .bind(sale.quantity)
        .bind(total.cents())
        .execute(&mut *tx)
        .await?;

        // Guarded decrement: a concurrent writer may have sold units since the read
        let decremented = sqlx::query(
            r#"
            UPDATE stock
            SET quantity = quantity - ?1, last_updated = ?2
            WHERE medicine_id = ?3 AND quantity >= ?1
            "#,
        )
        .bind(sale.quantity)
        .bind(on)
        .bind(sale.medicine_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            warn!(medicine_id = sale.medicine_id, "Stock changed during sale");
            tx.rollback().await?;
            return Err(CoreError::InsufficientStock {
                medicine_id: sale.medicine_id,
                available: stock.quantity,
                requested: sale.quantity,
            }
            .into());
        }

        tx.commit().await?;

        let recorded = Sale {
            id: inserted.last_insert_rowid(),
            customer_id: sale.customer_id,
            medicine_id: sale.medicine_id,
            sale_date: on,
            quantity: sale.quantity,
            total_cents: total.cents(),
        };

        info!(
            sale_id = recorded.id,
            medicine_id = recorded.medicine_id,
            total = %total,
            "Sale recorded"
        );

        Ok(recorded)
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, medicine_id, sale_date, quantity, total_cents
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists every sale in id order.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, medicine_id, sale_date, quantity, total_cents
            FROM sales
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}
