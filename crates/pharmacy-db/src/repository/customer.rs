//! # Customer Repository
//!
//! Database operations for customers.
//!
//! Phone numbers are unique: a second customer with the same phone is
//! refused by the store with [`UniqueField::Phone`](crate::UniqueField::Phone).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pharmacy_core::{Customer, NewCustomer};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a customer and returns it with its assigned id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation { field: Phone }` - phone already registered
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<Customer> {
        debug!(name = %customer.name, "Inserting customer");

        let result = sqlx::query(
            r#"
            INSERT INTO customer (name, address, phone)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(&customer.phone)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: customer.name.clone(),
            address: customer.address.clone(),
            phone: customer.phone.clone(),
        })
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, address, phone FROM customer WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Lists every customer in id order.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, address, phone FROM customer ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Deletes a customer by id.
    ///
    /// Deleting an id that doesn't exist is not an error. Returns the number
    /// of rows removed (0 or 1). Sales that reference the customer are kept.
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        debug!(id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customer WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DbError, UniqueField};
    use crate::repository::test_support::test_db;

    fn new_customer(name: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            address: None,
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = test_db().await;
        let repo = db.customers();

        let ann = repo.insert(&new_customer("Ann", "0123456789")).await.unwrap();
        let mut bob = new_customer("Bob", "9876543210");
        bob.address = Some("12 High St".to_string());
        let bob = repo.insert(&bob).await.unwrap();

        assert!(bob.id > ann.id);

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![ann.clone(), bob]);
        assert_eq!(repo.get_by_id(ann.id).await.unwrap(), Some(ann));
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_refused() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&new_customer("Ann", "0123456789")).await.unwrap();
        let err = repo
            .insert(&new_customer("Other", "0123456789"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::UniqueViolation {
                field: UniqueField::Phone
            }
        ));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_db().await;
        let repo = db.customers();

        let ann = repo.insert(&new_customer("Ann", "0123456789")).await.unwrap();

        assert_eq!(repo.delete(ann.id).await.unwrap(), 1);
        assert_eq!(repo.delete(ann.id).await.unwrap(), 0);
        assert_eq!(repo.delete(999).await.unwrap(), 0);
        assert!(repo.get_by_id(ann.id).await.unwrap().is_none());
    }
}
