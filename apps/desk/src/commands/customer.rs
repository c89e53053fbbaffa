//! # Customer Commands
//!
//! Add, delete and list customers.

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{parse_record_id, Added, Deleted};
use crate::error::ApiError;
use crate::state::DbState;
use pharmacy_core::validation::check_customer_form;
use pharmacy_core::Customer;

/// Customer form as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomerRequest {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub phone: String,
}

/// Validates and stores a new customer.
///
/// ## Errors
/// * `VALIDATION_ERROR` - missing name/phone, bad name, phone not 10 digits
/// * `DUPLICATE` - phone already registered
pub async fn add_customer(db: &DbState, request: NewCustomerRequest) -> Result<Added, ApiError> {
    debug!(name = %request.name, "add_customer command");

    let customer = check_customer_form(&request.name, request.address.as_deref(), &request.phone)
        .inspect_err(|e| warn!(error = %e, "Customer rejected"))?;

    let customer = db.inner().customers().insert(&customer).await?;
    info!(id = customer.id, "Customer added");

    Ok(Added {
        id: customer.id,
        message: "Customer added successfully!".to_string(),
    })
}

/// Deletes a customer by the id typed into the form.
///
/// Succeeds whether or not the customer existed.
pub async fn delete_customer(db: &DbState, id: &str) -> Result<Deleted, ApiError> {
    debug!(id = %id, "delete_customer command");

    let id = parse_record_id("customer id", id)?;
    let removed = db.inner().customers().delete(id).await? > 0;
    info!(id, removed, "Customer delete");

    Ok(Deleted {
        id,
        removed,
        message: format!("Customer {} deleted (if existed)", id),
    })
}

/// All customers in id order.
pub async fn list_customers(db: &DbState) -> Result<Vec<Customer>, ApiError> {
    debug!("list_customers command");
    Ok(db.inner().customers().list().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_support::test_state;

    fn request(name: &str, phone: &str) -> NewCustomerRequest {
        NewCustomerRequest {
            name: name.to_string(),
            address: Some("  ".to_string()),
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_customer() {
        let db = test_state().await;

        let added = add_customer(&db, request("Ann Lee", "0123456789")).await.unwrap();

        assert_eq!(added.message, "Customer added successfully!");
        let customers = list_customers(&db).await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, added.id);
        assert_eq!(customers[0].address, None);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let db = test_state().await;

        let err = add_customer(&db, request("Ann2", "0123456789")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_customer(&db, request("Ann", "12345")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_customer(&db, request("", "0123456789")).await.unwrap_err();
        assert_eq!(err.message, "name is required");

        assert!(list_customers(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_phone() {
        let db = test_state().await;

        add_customer(&db, request("Ann", "0123456789")).await.unwrap();
        let err = add_customer(&db, request("Bob", "0123456789")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Duplicate);
        assert_eq!(err.message, "Phone number already exists");
        assert_eq!(list_customers(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_reports_success() {
        let db = test_state().await;
        add_customer(&db, request("Ann", "0123456789")).await.unwrap();

        let deleted = delete_customer(&db, "999").await.unwrap();

        assert!(!deleted.removed);
        assert_eq!(deleted.message, "Customer 999 deleted (if existed)");
        assert_eq!(list_customers(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_requires_numeric_id() {
        let db = test_state().await;

        let err = delete_customer(&db, "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = delete_customer(&db, "three").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
