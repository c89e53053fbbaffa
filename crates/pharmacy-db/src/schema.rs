//! # Database Schema
//!
//! Create-if-absent schema for the six pharmacy tables.
//!
//! ## How Schema Setup Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Setup                                       │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CREATE TABLE IF NOT EXISTS supplier   ─┐                              │
//! │  CREATE TABLE IF NOT EXISTS customer    │  in dependency order,        │
//! │  CREATE TABLE IF NOT EXISTS employee    │  one transaction             │
//! │  CREATE TABLE IF NOT EXISTS medicine    │                              │
//! │  CREATE TABLE IF NOT EXISTS stock       │                              │
//! │  CREATE TABLE IF NOT EXISTS sales      ─┘                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  App continues startup                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no versioning: an existing table is left exactly as it is, so a
//! constraint added here later does not apply to a database created earlier.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Row count of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// Table definitions, parents before children.
///
/// Money is stored in integer cents, dates as `YYYY-MM-DD` text.
const TABLES: &[(&str, &str)] = &[
    (
        "supplier",
        r#"
        CREATE TABLE IF NOT EXISTS supplier (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL,
            contact  TEXT CHECK (contact IS NULL OR (length(contact) = 10 AND contact NOT GLOB '*[^0-9]*'))
        )
        "#,
    ),
    (
        "customer",
        r#"
        CREATE TABLE IF NOT EXISTS customer (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL,
            address  TEXT,
            phone    TEXT NOT NULL UNIQUE CHECK (length(phone) = 10 AND phone NOT GLOB '*[^0-9]*')
        )
        "#,
    ),
    (
        "employee",
        r#"
        CREATE TABLE IF NOT EXISTS employee (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL,
            role     TEXT NOT NULL,
            email    TEXT NOT NULL UNIQUE,
            phone    TEXT NOT NULL UNIQUE CHECK (length(phone) = 10 AND phone NOT GLOB '*[^0-9]*')
        )
        "#,
    ),
    (
        "medicine",
        r#"
        CREATE TABLE IF NOT EXISTS medicine (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            supplier_id       INTEGER NOT NULL REFERENCES supplier (id),
            brand             TEXT NOT NULL,
            price_cents       INTEGER NOT NULL CHECK (price_cents > 0),
            expiry_date       TEXT NOT NULL,
            manufacture_date  TEXT NOT NULL,
            CHECK (date(expiry_date) > date(manufacture_date))
        )
        "#,
    ),
    (
        "stock",
        r#"
        CREATE TABLE IF NOT EXISTS stock (
            medicine_id   INTEGER PRIMARY KEY REFERENCES medicine (id),
            quantity      INTEGER NOT NULL CHECK (quantity >= 0),
            last_updated  TEXT NOT NULL
        )
        "#,
    ),
    (
        "sales",
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id  INTEGER NOT NULL REFERENCES customer (id),
            medicine_id  INTEGER NOT NULL REFERENCES medicine (id),
            sale_date    TEXT NOT NULL,
            quantity     INTEGER NOT NULL CHECK (quantity > 0),
            total_cents  INTEGER NOT NULL CHECK (total_cents >= 0)
        )
        "#,
    ),
];

/// Name of the supplier `(name, contact)` index, as SQLite reports it.
pub const SUPPLIER_UNIQUE_INDEX: &str = "supplier_name_contact_key";

/// Indexes created after the tables.
///
/// A missing supplier contact counts as a value of its own, so the same name
/// with no contact is refused twice. A table `UNIQUE (name, contact)` would
/// let NULL contacts repeat.
const INDEXES: &[(&str, &str)] = &[(
    SUPPLIER_UNIQUE_INDEX,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS supplier_name_contact_key
        ON supplier (name, IFNULL(contact, ''))
    "#,
)];

/// Creates any missing tables.
///
/// ## Safety
/// - Idempotent: safe to run on every startup
/// - Transactional: either every missing table is created or none is
pub async fn create_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring database schema exists");

    let mut tx = pool.begin().await?;
    for &(table, ddl) in TABLES {
        debug!(table = %table, "Creating table if absent");
        sqlx::query(ddl)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::SchemaFailed(format!("{}: {}", table, e)))?;
    }
    for &(index, ddl) in INDEXES {
        debug!(index = %index, "Creating index if absent");
        sqlx::query(ddl)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::SchemaFailed(format!("{}: {}", index, e)))?;
    }
    tx.commit().await?;

    info!(tables = TABLES.len(), "Schema ready");
    Ok(())
}

/// Returns the row count of every table.
///
/// ## Usage
/// For diagnostics (the shell's `status` command).
pub async fn table_counts(pool: &SqlitePool) -> DbResult<Vec<TableCount>> {
    let mut counts = Vec::with_capacity(TABLES.len());
    for &(table, _) in TABLES {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let rows: i64 = sqlx::query_scalar(&sql).fetch_one(pool).await?;
        counts.push(TableCount { table, rows });
    }
    Ok(counts)
}
