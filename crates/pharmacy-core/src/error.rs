//! # Error Types
//!
//! Domain-specific error types for pharmacy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pharmacy-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations (stock, amounts)      │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  pharmacy-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Desk app errors                                                       │
//! │  └── ApiError         - What the shell sees (code + message)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Shell        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, amounts)
//! 3. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are raised by
/// pure domain methods (e.g. [`crate::Stock::ensure_available`]) and carried
/// through the database layer up to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Insufficient stock to complete a sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Record Sale (medicine 4, qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { medicine_id: 4, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Shell shows: "Requested 5 but only 3 in stock"
    /// ```
    #[error("Requested {requested} but only {available} in stock")]
    InsufficientStock {
        medicine_id: i64,
        available: i64,
        requested: i64,
    },

    /// A sale total does not fit in the money representation.
    #[error("Total amount overflows for quantity {quantity}")]
    AmountOverflow { quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a form field doesn't meet requirements. They are
/// produced before any store access, so a `ValidationError` always means the
/// database was never touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field must contain only letters and spaces.
    #[error("{field} must contain only letters and spaces")]
    LettersOnly { field: &'static str },

    /// Field must be exactly ten decimal digits.
    #[error("{field} must be exactly 10 digits")]
    TenDigits { field: &'static str },

    /// Field is not a `local@domain.tld` address.
    #[error("{field} has invalid email format")]
    Email { field: &'static str },

    /// Field is not a `YYYY-MM-DD` date.
    #[error("{field} must be in YYYY-MM-DD format")]
    DateFormat { field: &'static str },

    /// Expiry does not come strictly after manufacture.
    #[error("Expiry date must be after manufacture date")]
    DateOrder,

    /// Value must be a number greater than zero.
    #[error("{field} must be a positive number")]
    MustBePositive { field: &'static str },

    /// Value is positive but too large to store in cents.
    #[error("{field} is too large")]
    TooLarge { field: &'static str },

    /// Value must be an integer greater than zero.
    #[error("{field} must be a positive integer")]
    MustBePositiveInteger { field: &'static str },

    /// Value must be an integer greater than or equal to zero.
    #[error("{field} must be a non-negative integer")]
    MustBeNonNegativeInteger { field: &'static str },

    /// Identifier fields must be whole numbers.
    #[error("{field} must be a whole number")]
    InvalidId { field: &'static str },

    /// The supplier picker was left on its placeholder.
    #[error("Please select a supplier")]
    NoSupplierSelected,
}

impl ValidationError {
    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::LettersOnly { field }
            | ValidationError::TenDigits { field }
            | ValidationError::Email { field }
            | ValidationError::DateFormat { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::TooLarge { field }
            | ValidationError::MustBePositiveInteger { field }
            | ValidationError::MustBeNonNegativeInteger { field }
            | ValidationError::InvalidId { field } => Some(field),
            ValidationError::DateOrder => Some("expiry date"),
            ValidationError::NoSupplierSelected => Some("supplier"),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
