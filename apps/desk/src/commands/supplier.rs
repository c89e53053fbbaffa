//! # Supplier Commands
//!
//! Add and list suppliers, and fill the medicine form's supplier picker.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::Added;
use crate::error::ApiError;
use crate::state::DbState;
use pharmacy_core::validation::check_supplier_form;
use pharmacy_core::{Supplier, SupplierChoice};

/// Supplier form as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplierRequest {
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
}

/// One entry of the supplier picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierChoiceDto {
    pub id: i64,
    pub name: String,
    /// `"<id>: <name>"`, accepted back by the medicine form
    pub label: String,
}

impl From<SupplierChoice> for SupplierChoiceDto {
    fn from(choice: SupplierChoice) -> Self {
        SupplierChoiceDto {
            label: choice.label(),
            id: choice.id,
            name: choice.name,
        }
    }
}

/// Validates and stores a new supplier.
///
/// ## Errors
/// * `VALIDATION_ERROR` - missing or non-letter name, contact not 10 digits
/// * `DUPLICATE` - same name and contact already registered
pub async fn add_supplier(db: &DbState, request: NewSupplierRequest) -> Result<Added, ApiError> {
    debug!(name = %request.name, "add_supplier command");

    let supplier = check_supplier_form(&request.name, request.contact.as_deref())
        .inspect_err(|e| warn!(error = %e, "Supplier rejected"))?;

    let supplier = db.inner().suppliers().insert(&supplier).await?;
    info!(id = supplier.id, "Supplier added");

    Ok(Added {
        id: supplier.id,
        message: "Supplier added successfully!".to_string(),
    })
}

/// All suppliers in id order.
pub async fn list_suppliers(db: &DbState) -> Result<Vec<Supplier>, ApiError> {
    debug!("list_suppliers command");
    Ok(db.inner().suppliers().list().await?)
}

/// Supplier picker entries, ordered by name.
pub async fn supplier_choices(db: &DbState) -> Result<Vec<SupplierChoiceDto>, ApiError> {
    debug!("supplier_choices command");

    let choices = db.inner().suppliers().choices().await?;
    Ok(choices.into_iter().map(SupplierChoiceDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_support::test_state;

    fn request(name: &str, contact: Option<&str>) -> NewSupplierRequest {
        NewSupplierRequest {
            name: name.to_string(),
            contact: contact.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_choices_render_labels_by_name() {
        let db = test_state().await;

        let zeta = add_supplier(&db, request("Zeta", None)).await.unwrap();
        let acme = add_supplier(&db, request("Acme", Some("0123456789")))
            .await
            .unwrap();

        let labels: Vec<String> = supplier_choices(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();

        assert_eq!(
            labels,
            vec![format!("{}: Acme", acme.id), format!("{}: Zeta", zeta.id)]
        );
    }

    #[tokio::test]
    async fn test_contact_checked_only_when_present() {
        let db = test_state().await;

        add_supplier(&db, request("Acme", Some(" "))).await.unwrap();

        let err = add_supplier(&db, request("Acme", Some("12ab")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_duplicate_supplier() {
        let db = test_state().await;
        add_supplier(&db, request("Acme", Some("0123456789")))
            .await
            .unwrap();

        let err = add_supplier(&db, request("Acme", Some("0123456789")))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Duplicate);
        assert_eq!(err.message, "Supplier already exists");
        assert_eq!(list_suppliers(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_supplier_without_contact() {
        let db = test_state().await;
        add_supplier(&db, request("Acme", None)).await.unwrap();

        let err = add_supplier(&db, request("Acme", Some("")))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Duplicate);
        assert_eq!(err.field.as_deref(), Some("supplier"));
        assert_eq!(list_suppliers(&db).await.unwrap().len(), 1);
    }
}
