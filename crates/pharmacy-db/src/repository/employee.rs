//! # Employee Repository
//!
//! Database operations for staff records. Email and phone are each unique.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pharmacy_core::{Employee, NewEmployee};

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Inserts an employee and returns it with its assigned id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation { field: Email }` - email already registered
    /// * `DbError::UniqueViolation { field: Phone }` - phone already registered
    pub async fn insert(&self, employee: &NewEmployee) -> DbResult<Employee> {
        debug!(name = %employee.name, role = %employee.role, "Inserting employee");

        let result = sqlx::query(
            r#"
            INSERT INTO employee (name, role, email, phone)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.role)
        .bind(&employee.email)
        .bind(&employee.phone)
        .execute(&self.pool)
        .await?;

        Ok(Employee {
            id: result.last_insert_rowid(),
            name: employee.name.clone(),
            role: employee.role.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
        })
    }

    /// Gets an employee by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, name, role, email, phone FROM employee WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Lists every employee in id order.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, name, role, email, phone FROM employee ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// Deletes an employee by id. A missing id removes nothing.
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        debug!(id, "Deleting employee");

        let result = sqlx::query("DELETE FROM employee WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
