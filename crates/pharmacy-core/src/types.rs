//! # Domain Types
//!
//! Core domain types used throughout Pharmacy Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐      ┌──────────────┐      ┌──────────────┐          │
//! │  │   Supplier   │◄─────│   Medicine   │◄─────│    Stock     │          │
//! │  │  ──────────  │  1:N │  ──────────  │  1:1 │  ──────────  │          │
//! │  │  id          │      │  id          │      │  medicine_id │          │
//! │  │  name        │      │  supplier_id │      │  quantity    │          │
//! │  │  contact?    │      │  brand       │      │  last_updated│          │
//! │  └──────────────┘      │  price_cents │      └──────────────┘          │
//! │                        │  expiry/mfg  │                                 │
//! │                        └──────▲───────┘                                 │
//! │                               │ N:1                                     │
//! │  ┌──────────────┐      ┌──────┴───────┐      ┌──────────────┐          │
//! │  │   Customer   │◄─────│     Sale     │      │   Employee   │          │
//! │  │  id, name    │  N:1 │  quantity    │      │  id, name    │          │
//! │  │  address?    │      │  total_cents │      │  role, email │          │
//! │  │  phone       │      │  sale_date   │      │  phone       │          │
//! │  └──────────────┘      └──────────────┘      └──────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Types vs. New Types
//! Row types (`Customer`, `Medicine`, ...) mirror what the store returns,
//! including the generated id. `New*` types carry already-validated input
//! for an insert and can only be built from parsed values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A pharmacy customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    /// Exactly ten digits, unique across customers.
    pub phone: String,
}

/// Validated input for a customer insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub address: Option<String>,
    pub phone: String,
}

// =============================================================================
// Employee
// =============================================================================

/// A member of staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: String,
    /// Unique across employees.
    pub email: String,
    /// Unique across employees.
    pub phone: String,
}

/// Validated input for an employee insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// Supplier
// =============================================================================

/// A medicine supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact: Option<String>,
}

/// Validated input for a supplier insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplier {
    pub name: String,
    pub contact: Option<String>,
}

/// One entry in the supplier picker shown on the medicine form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SupplierChoice {
    pub id: i64,
    pub name: String,
}

impl SupplierChoice {
    /// Picker label in `"<id>: <name>"` form.
    ///
    /// [`crate::validation::check_supplier_selection`] reads the id back out
    /// of a label like this.
    pub fn label(&self) -> String {
        format!("{}: {}", self.id, self.name)
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A medicine available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: i64,
    pub supplier_id: i64,
    pub brand: String,
    /// Unit price in cents, always > 0.
    pub price_cents: i64,
    pub expiry_date: NaiveDate,
    pub manufacture_date: NaiveDate,
}

impl Medicine {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Total for selling `quantity` units at the current price.
    pub fn total_for(&self, quantity: i64) -> CoreResult<Money> {
        self.price()
            .checked_mul_quantity(quantity)
            .ok_or(CoreError::AmountOverflow { quantity })
    }
}

/// Validated input for a medicine insert.
///
/// `expiry_date > manufacture_date` holds for every value produced by
/// [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicine {
    /// `None` when the picker text carries no numeric id. The store reports
    /// that the same way as an id it does not know.
    pub supplier_id: Option<i64>,
    pub brand: String,
    pub price: Money,
    pub expiry_date: NaiveDate,
    pub manufacture_date: NaiveDate,
}

// =============================================================================
// Stock
// =============================================================================

/// Stock level for one medicine (keyed 1:1 by medicine id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub medicine_id: i64,
    pub quantity: i64,
    pub last_updated: NaiveDate,
}

impl Stock {
    /// Checks that `requested` units can be taken from this stock row.
    ///
    /// Selling exactly the available quantity is allowed and leaves zero.
    pub fn ensure_available(&self, requested: i64) -> CoreResult<()> {
        if self.quantity < requested {
            return Err(CoreError::InsufficientStock {
                medicine_id: self.medicine_id,
                available: self.quantity,
                requested,
            });
        }

        Ok(())
    }
}

/// Whether a stock set created a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAction {
    Created,
    Updated,
}

impl StockAction {
    /// Lowercase verb used in user-facing messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockAction::Created => "created",
            StockAction::Updated => "updated",
        }
    }
}

/// A row of the low-stock report: stock joined with the medicine brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct LowStockRow {
    pub medicine_id: i64,
    pub brand: String,
    pub quantity: i64,
    pub last_updated: NaiveDate,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of one medicine to one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub customer_id: i64,
    pub medicine_id: i64,
    pub sale_date: NaiveDate,
    pub quantity: i64,
    /// quantity × unit price at the moment of sale.
    pub total_cents: i64,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Validated input for the sale transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSale {
    pub customer_id: i64,
    pub medicine_id: i64,
    /// Always > 0.
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
