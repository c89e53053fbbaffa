//! # Medicine Commands
//!
//! Add, delete and list catalogue entries.
//!
//! ## Add Flow
//! ```text
//! supplier picked? ─► brand/price/dates present? ─► price > 0?
//!        ─► dates YYYY-MM-DD? ─► expiry after manufacture? ─► supplier exists?
//!        ─► INSERT
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{parse_record_id, Added, Deleted};
use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use pharmacy_core::validation::check_medicine_form;
use pharmacy_core::Medicine;

/// Medicine form as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicineRequest {
    /// Picker label (`"3: Acme"`) or bare supplier id
    pub supplier: String,
    pub brand: String,
    pub price: String,
    pub expiry_date: String,
    pub manufacture_date: String,
}

/// Medicine as shown in the table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDto {
    #[serde(flatten)]
    pub medicine: Medicine,
    /// Price with the configured currency symbol
    pub price: String,
}

/// Validates and stores a new medicine.
///
/// ## Errors
/// * `VALIDATION_ERROR` - no supplier picked, missing field, bad price or dates
/// * `NOT_FOUND` - "Invalid Supplier ID"
pub async fn add_medicine(db: &DbState, request: NewMedicineRequest) -> Result<Added, ApiError> {
    debug!(brand = %request.brand, supplier = %request.supplier, "add_medicine command");

    let medicine = check_medicine_form(
        &request.supplier,
        &request.brand,
        &request.price,
        &request.expiry_date,
        &request.manufacture_date,
    )
    .inspect_err(|e| warn!(error = %e, "Medicine rejected"))?;

    let medicine = db.inner().medicines().insert(&medicine).await?;
    info!(id = medicine.id, brand = %medicine.brand, "Medicine added");

    Ok(Added {
        id: medicine.id,
        message: "Medicine added successfully!".to_string(),
    })
}

/// Deletes a medicine and its stock row. Succeeds whether or not it existed.
pub async fn delete_medicine(db: &DbState, id: &str) -> Result<Deleted, ApiError> {
    debug!(id = %id, "delete_medicine command");

    let id = parse_record_id("medicine id", id)?;
    let removed = db.inner().medicines().delete(id).await? > 0;

    Ok(Deleted {
        id,
        removed,
        message: format!("Medicine {} and its stock removed (if existed)", id),
    })
}

/// All medicines in id order.
pub async fn list_medicines(
    db: &DbState,
    config: &ConfigState,
) -> Result<Vec<MedicineDto>, ApiError> {
    debug!("list_medicines command");

    let medicines = db.inner().medicines().list().await?;
    Ok(medicines
        .into_iter()
        .map(|medicine| MedicineDto {
            price: config.format_currency(medicine.price()),
            medicine,
        })
        .collect())
}
