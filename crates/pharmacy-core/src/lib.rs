//! # pharmacy-core: Pure Business Logic for Pharmacy Desk
//!
//! This crate contains the domain model and every input rule of the
//! pharmacy as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pharmacy Desk Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Desk Shell (CLI)                             │   │
//! │  │   customer add ─► medicine add ─► stock set ─► sale record      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ request structs                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Entity Services (desk commands)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pharmacy-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │ Customer  │  │   Money   │  │ name/phone│                  │   │
//! │  │   │ Medicine  │  │  (cents)  │  │ email/date│                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pharmacy-db (Database Layer)                    │   │
//! │  │            SQLite schema, repositories, sale transaction        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Medicine, Stock, Sale, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Form field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use pharmacy_core::validation::check_medicine_form;
//!
//! let medicine = check_medicine_form("1: Acme", "Aspirin", "2.50", "2027-01-01", "2025-01-01")
//!     .unwrap();
//! assert_eq!(medicine.price.cents(), 250);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Calendar date format used for every stored and typed date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stock rows with a quantity strictly below this show in the low-stock view.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Placeholder shown by the supplier picker before a choice is made.
pub const SUPPLIER_PLACEHOLDER: &str = "Select Supplier";
