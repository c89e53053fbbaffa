//! # Stock Commands
//!
//! Set absolute stock levels and report what is running low.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use pharmacy_core::validation::{check_id, check_stock_quantity, require};
use pharmacy_core::{LowStockRow, Stock, StockAction};
use pharmacy_db::DbError;

/// Stock form as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStockRequest {
    pub medicine_id: String,
    pub quantity: String,
}

/// Result of a stock set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSet {
    pub medicine_id: i64,
    pub quantity: i64,
    pub action: StockAction,
    pub message: String,
}

/// Sets the stock level of a medicine, creating the row if needed.
///
/// ## Errors
/// * `VALIDATION_ERROR` - missing field, quantity not a whole number >= 0
/// * `NOT_FOUND` - "Invalid Medicine ID"
pub async fn set_stock(db: &DbState, request: SetStockRequest) -> Result<StockSet, ApiError> {
    debug!(
        medicine_id = %request.medicine_id,
        quantity = %request.quantity,
        "set_stock command"
    );

    let (medicine_id, quantity) = parse_stock_form(&request)
        .inspect_err(|e| warn!(error = %e, "Stock update rejected"))?;

    let action = db
        .inner()
        .stock()
        .set(medicine_id, quantity, pharmacy_db::today())
        .await
        .map_err(|e| match e {
            DbError::NotFound { .. } => ApiError::not_found("Invalid Medicine ID"),
            other => other.into(),
        })?;

    info!(medicine_id, quantity, action = action.as_str(), "Stock set");

    Ok(StockSet {
        medicine_id,
        quantity,
        action,
        message: format!("Stock record {} successfully", action.as_str()),
    })
}

fn parse_stock_form(request: &SetStockRequest) -> Result<(i64, i64), ApiError> {
    require("medicine id", &request.medicine_id)?;
    require("quantity", &request.quantity)?;

    let quantity = check_stock_quantity(&request.quantity)?;
    let medicine_id = check_id("medicine id", &request.medicine_id)?;
    Ok((medicine_id, quantity))
}

/// All stock rows in medicine id order.
pub async fn list_stock(db: &DbState) -> Result<Vec<Stock>, ApiError> {
    debug!("list_stock command");
    Ok(db.inner().stock().list().await?)
}

/// Stock rows strictly below `threshold` (or the configured default),
/// lowest first.
pub async fn list_low_stock(
    db: &DbState,
    config: &ConfigState,
    threshold: Option<i64>,
) -> Result<Vec<LowStockRow>, ApiError> {
    let threshold = threshold.unwrap_or(config.low_stock_threshold);
    debug!(threshold, "list_low_stock command");

    Ok(db.inner().stock().list_low_stock(threshold).await?)
}
