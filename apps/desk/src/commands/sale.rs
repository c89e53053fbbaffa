//! # Sale Commands
//!
//! Record a sale (insert + stock decrement, all or nothing) and list sales.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use pharmacy_core::validation::check_sale_form;
use pharmacy_core::Sale;

/// Sale form as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleRequest {
    pub customer_id: String,
    pub medicine_id: String,
    pub quantity: String,
}

/// Result of a recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecorded {
    pub sale: Sale,
    /// Total with the configured currency symbol
    pub total: String,
    pub message: String,
}

/// Records a sale and takes the units out of stock.
///
/// The customer id is not checked against the customer table.
///
/// ## Errors
/// * `VALIDATION_ERROR` - missing field, non-numeric id, quantity not > 0
/// * `NOT_FOUND` - "Medicine not found" / "No stock record found for this medicine"
/// * `INSUFFICIENT_STOCK` - with requested and available units
pub async fn record_sale(
    db: &DbState,
    config: &ConfigState,
    request: NewSaleRequest,
) -> Result<SaleRecorded, ApiError> {
    debug!(
        customer_id = %request.customer_id,
        medicine_id = %request.medicine_id,
        quantity = %request.quantity,
        "record_sale command"
    );

    let sale = check_sale_form(&request.customer_id, &request.medicine_id, &request.quantity)
        .inspect_err(|e| warn!(error = %e, "Sale rejected"))?;

    let sale = db
        .inner()
        .sales()
        .record(sale)
        .await
        .inspect_err(|e| warn!(error = %e, "Sale not recorded"))?;

    let total = config.format_currency(sale.total());
    info!(sale_id = sale.id, total = %total, "Sale recorded");

    Ok(SaleRecorded {
        message: format!("Sale added! Total Amount: {}", total),
        total,
        sale,
    })
}

/// All sales in id order.
pub async fn list_sales(db: &DbState) -> Result<Vec<Sale>, ApiError> {
    debug!("list_sales command");
    Ok(db.inner().sales().list().await?)
}
