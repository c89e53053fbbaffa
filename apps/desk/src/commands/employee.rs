//! # Employee Commands

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{parse_record_id, Added, Deleted};
use crate::error::ApiError;
use crate::state::DbState;
use pharmacy_core::validation::check_employee_form;
use pharmacy_core::Employee;

/// Employee form as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployeeRequest {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
}

/// Validates and stores a new employee.
///
/// ## Errors
/// * `VALIDATION_ERROR` - any field missing, bad name, email or phone
/// * `DUPLICATE` - email or phone already registered (`field` says which)
pub async fn add_employee(db: &DbState, request: NewEmployeeRequest) -> Result<Added, ApiError> {
    debug!(name = %request.name, role = %request.role, "add_employee command");

    let employee = check_employee_form(
        &request.name,
        &request.role,
        &request.email,
        &request.phone,
    )
    .inspect_err(|e| warn!(error = %e, "Employee rejected"))?;

    let employee = db.inner().employees().insert(&employee).await?;
    info!(id = employee.id, "Employee added");

    Ok(Added {
        id: employee.id,
        message: "Employee added successfully!".to_string(),
    })
}

/// Deletes an employee by id. Succeeds whether or not the row existed.
pub async fn delete_employee(db: &DbState, id: &str) -> Result<Deleted, ApiError> {
    debug!(id = %id, "delete_employee command");

    let id = parse_record_id("employee id", id)?;
    let removed = db.inner().employees().delete(id).await? > 0;
    info!(id, removed, "Employee delete");

    Ok(Deleted {
        id,
        removed,
        message: format!("Employee {} deleted (if existed)", id),
    })
}

/// All employees in id order.
pub async fn list_employees(db: &DbState) -> Result<Vec<Employee>, ApiError> {
    debug!("list_employees command");
    Ok(db.inner().employees().list().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_support::test_state;

    fn request(email: &str, phone: &str) -> NewEmployeeRequest {
        NewEmployeeRequest {
            name: "Jane Doe".to_string(),
            role: "Pharmacist".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_delete_employee() {
        let db = test_state().await;

        let added = add_employee(&db, request("jane@example.com", "5551234567"))
            .await
            .unwrap();
        assert_eq!(added.message, "Employee added successfully!");

        let deleted = delete_employee(&db, &added.id.to_string()).await.unwrap();
        assert!(deleted.removed);
        assert!(list_employees(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_name_the_field() {
        let db = test_state().await;
        add_employee(&db, request("jane@example.com", "5551234567"))
            .await
            .unwrap();

        let err = add_employee(&db, request("jane@example.com", "5559999999"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Duplicate);
        assert_eq!(err.message, "Email address already exists");
        assert_eq!(err.field.as_deref(), Some("email"));

        let err = add_employee(&db, request("joe@example.com", "5551234567"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Phone number already exists");
        assert_eq!(err.field.as_deref(), Some("phone"));
    }

    #[tokio::test]
    async fn test_email_checked_before_phone() {
        let db = test_state().await;

        let err = add_employee(&db, request("not-an-email", "123"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("email"));
    }
}
