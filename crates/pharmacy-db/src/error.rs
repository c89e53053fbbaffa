//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Classifies constraint failures                │
//! │       │                  UNIQUE → UniqueViolation { field }             │
//! │       ▼                                                                 │
//! │  ApiError (desk app) ← Duplicate / NotFound / ...                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shell displays user-friendly message                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use pharmacy_core::CoreError;
use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::schema::SUPPLIER_UNIQUE_INDEX;

/// Which uniqueness rule an insert broke.
///
/// SQLite reports the columns of the failed index; they are mapped here once,
/// so callers match on a variant instead of inspecting message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueField {
    /// `customer.phone` or `employee.phone`.
    Phone,
    /// `employee.email`.
    Email,
    /// `supplier(name, contact)`.
    Supplier,
    /// Any other unique index, with SQLite's column list.
    Other(String),
}

impl UniqueField {
    /// Maps SQLite's `"UNIQUE constraint failed: t.a, t.b"` message, or
    /// `"UNIQUE constraint failed: index 'name'"` for expression indexes.
    pub fn from_sqlite_message(message: &str) -> Self {
        let columns = message
            .split_once("UNIQUE constraint failed: ")
            .map(|(_, cols)| cols.trim())
            .unwrap_or(message);

        if columns.contains(SUPPLIER_UNIQUE_INDEX) {
            return UniqueField::Supplier;
        }

        let mut names = columns.split(',').map(str::trim);
        match names.next() {
            Some("customer.phone") | Some("employee.phone") => UniqueField::Phone,
            Some("employee.email") => UniqueField::Email,
            Some(col) if col.starts_with("supplier.") => UniqueField::Supplier,
            _ => UniqueField::Other(columns.to_string()),
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Phone => f.write_str("Phone number"),
            UniqueField::Email => f.write_str("Email address"),
            UniqueField::Supplier => f.write_str("Supplier"),
            UniqueField::Other(columns) => write!(f, "Value for {}", columns),
        }
    }
}

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Selling a medicine id that doesn't exist
    /// - Selling a medicine that has no stock row yet
    /// - Setting stock for an unknown medicine
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Duplicate customer or employee phone
    /// - Duplicate employee email
    /// - Same supplier name + contact twice
    #[error("{field} already exists")]
    UniqueViolation { field: UniqueField },

    /// Foreign key constraint violation (only with enforcement enabled).
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK or NOT NULL constraint violation.
    ///
    /// Input reaching the store has already been validated, so this points at
    /// a row written by something other than the services.
    #[error("Constraint violated: {message}")]
    ConstraintViolation { message: String },

    /// A business rule refused the operation (e.g. insufficient stock).
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Creating the tables failed.
    #[error("Schema setup failed: {0}")]
    SchemaFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: UniqueField) -> Self {
        DbError::UniqueViolation { field }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound          → DbError::NotFound
/// Database (UniqueViolation)        → DbError::UniqueViolation { field }
/// Database (ForeignKeyViolation)    → DbError::ForeignKeyViolation
/// Database (Check / NotNull)        → DbError::ConstraintViolation
/// Database (other)                  → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut         → DbError::PoolExhausted
/// Other                             → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation {
                        field: UniqueField::from_sqlite_message(&message),
                    },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message },
                    ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                        DbError::ConstraintViolation { message }
                    }
                    _ => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_field_from_message() {
        assert_eq!(
            UniqueField::from_sqlite_message("UNIQUE constraint failed: customer.phone"),
            UniqueField::Phone
        );
        assert_eq!(
            UniqueField::from_sqlite_message("UNIQUE constraint failed: employee.email"),
            UniqueField::Email
        );
        assert_eq!(
            UniqueField::from_sqlite_message("UNIQUE constraint failed: employee.phone"),
            UniqueField::Phone
        );
        assert_eq!(
            UniqueField::from_sqlite_message(
                "UNIQUE constraint failed: supplier.name, supplier.contact"
            ),
            UniqueField::Supplier
        );
        assert_eq!(
            UniqueField::from_sqlite_message(
                "UNIQUE constraint failed: index 'supplier_name_contact_key'"
            ),
            UniqueField::Supplier
        );
        assert_eq!(
            UniqueField::from_sqlite_message("UNIQUE constraint failed: stock.medicine_id"),
            UniqueField::Other("stock.medicine_id".to_string())
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DbError::duplicate(UniqueField::Email).to_string(),
            "Email address already exists"
        );
        assert_eq!(
            DbError::not_found("Medicine", 9).to_string(),
            "Medicine not found: 9"
        );
    }
}
