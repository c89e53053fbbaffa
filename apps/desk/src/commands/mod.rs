//! # Desk Commands
//!
//! One async function per desk operation. Each takes a request of raw form
//! strings, validates it with `pharmacy_core::validation`, then talks to the
//! store through `pharmacy_db`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared responses)
//! ├── customer.rs  ◄─── add / delete / list
//! ├── employee.rs  ◄─── add / delete / list
//! ├── supplier.rs  ◄─── add / list / picker choices
//! ├── medicine.rs  ◄─── add / delete (with stock) / list
//! ├── stock.rs     ◄─── set / list / low stock
//! ├── sale.rs      ◄─── record (atomic) / list
//! └── config.rs    ◄─── configuration and status
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pharmacy-desk customer add --name Ann --phone 0123456789              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  add_customer(&db, NewCustomerRequest { .. })                          │
//! │         │                                                               │
//! │         ├── check_customer_form(..)  ── invalid ──► VALIDATION_ERROR   │
//! │         ▼                                                               │
//! │  db.customers().insert(..)          ── taken ────► DUPLICATE           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Added { id, message: "Customer added successfully!" }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod customer;
pub mod employee;
pub mod medicine;
pub mod sale;
pub mod stock;
pub mod supplier;

use serde::Serialize;

use crate::error::ApiError;
use pharmacy_core::validation::check_id;

/// Response of every "add" command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Added {
    /// Id assigned by the store
    pub id: i64,
    pub message: String,
}

/// Response of every "delete" command.
///
/// Deletes are idempotent: the message is the same whether or not a row
/// matched; `removed` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub id: i64,
    pub removed: bool,
    pub message: String,
}

/// Parses a required record id typed into a form.
pub(crate) fn parse_record_id(field: &'static str, raw: &str) -> Result<i64, ApiError> {
    Ok(check_id(field, raw)?)
}
