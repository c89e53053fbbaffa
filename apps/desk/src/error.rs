//! # API Error Type
//!
//! Unified error type for desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pharmacy Desk                          │
//! │                                                                         │
//! │  Command Function  ── Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError ("phone must be exactly 10 digits")        │
//! │         │        └──────────────────────────► VALIDATION_ERROR          │
//! │         │                                                               │
//! │         ├── DbError::UniqueViolation { Phone } ─► DUPLICATE             │
//! │         ├── DbError::NotFound { "Medicine" } ───► NOT_FOUND             │
//! │         ├── CoreError::InsufficientStock ───────► INSUFFICIENT_STOCK    │
//! │         └── anything else from the store ───────► DATABASE_ERROR        │
//! │                                                                         │
//! │  The shell prints `message`, or the whole error as JSON with --json.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use pharmacy_core::{CoreError, ValidationError};
use pharmacy_db::{DbError, UniqueField};

/// API error returned from desk commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Requested 4 but only 2 in stock",
///   "shortfall": { "requested": 4, "available": 2 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Offending field, for `VALIDATION_ERROR` and `DUPLICATE`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Requested and available units, for `INSUFFICIENT_STOCK`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall: Option<StockShortfall>,
}

/// Requested vs available units of a refused sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockShortfall {
    pub requested: i64,
    pub available: i64,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Referenced record does not exist
    NotFound,

    /// A unique field is already taken
    Duplicate,

    /// Not enough units to sell
    InsufficientStock,

    /// Storage failure
    DatabaseError,

    /// Anything else (e.g. data directory unavailable)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field: None,
            shortfall: None,
        }
    }

    /// Creates a not found error with a display message.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a duplicate error naming the field.
    pub fn duplicate(field: &UniqueField) -> Self {
        let field_name = match field {
            UniqueField::Phone => "phone".to_string(),
            UniqueField::Email => "email".to_string(),
            UniqueField::Supplier => "supplier".to_string(),
            UniqueField::Other(columns) => columns.clone(),
        };

        ApiError {
            field: Some(field_name),
            ..ApiError::new(ErrorCode::Duplicate, format!("{} already exists", field))
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            field: err.field().map(str::to_string),
            ..ApiError::validation(err.to_string())
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => ApiError {
                shortfall: Some(StockShortfall {
                    requested,
                    available,
                }),
                ..ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            },
            CoreError::AmountOverflow { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts database errors to API errors.
///
/// ## NotFound Messages
/// ```text
/// Supplier      → "Invalid Supplier ID"
/// Stock record  → "No stock record found for this medicine"
/// Medicine      → "Medicine not found"
/// ```
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => match entity.as_str() {
                "Supplier" => ApiError::not_found("Invalid Supplier ID"),
                "Stock record" => ApiError::not_found("No stock record found for this medicine"),
                _ => {
                    tracing::debug!(entity = %entity, id = %id, "Record not found");
                    ApiError::not_found(format!("{} not found", entity))
                }
            },
            DbError::UniqueViolation { field } => ApiError::duplicate(&field),
            DbError::Rejected(core) => core.into(),
            DbError::ForeignKeyViolation { message } => {
                error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Database constraint violation")
            }
            DbError::ConstraintViolation { message } => {
                error!("Constraint violation: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Database constraint violation")
            }
            DbError::ConnectionFailed(e) => {
                error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, format!("Database connection failed: {}", e))
            }
            DbError::SchemaFailed(e) => {
                error!("Schema setup failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, format!("Database setup failed: {}", e))
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, e)
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
        }
    }
}
