//! # Repository Module
//!
//! One repository per table.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Desk command                                                          │
//! │       │                                                                 │
//! │       │  db.medicines().insert(&new_medicine)                          │
//! │       ▼                                                                 │
//! │  MedicineRepository                                                    │
//! │  ├── insert(&self, medicine)                                           │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list(&self)                                                       │
//! │  └── delete(&self, id)        (stock row first, one transaction)       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository receives input that already passed the form checks in
//! `pharmacy_core::validation`; the store enforces uniqueness and the
//! CHECK constraints in the schema as a second line.
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository)
//! - [`EmployeeRepository`](employee::EmployeeRepository)
//! - [`SupplierRepository`](supplier::SupplierRepository) - also the picker list
//! - [`MedicineRepository`](medicine::MedicineRepository)
//! - [`StockRepository`](stock::StockRepository) - upsert and low-stock query
//! - [`SaleRepository`](sale::SaleRepository) - the sale transaction

pub mod customer;
pub mod employee;
pub mod medicine;
pub mod sale;
pub mod stock;
pub mod supplier;

/// Shared fixtures for repository tests.
#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use pharmacy_core::{Money, NewMedicine, NewSupplier};

    use crate::pool::{Database, DbConfig};

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Inserts a supplier and a medicine priced at `price_cents`.
    /// Returns the medicine id.
    pub async fn seed_medicine(db: &Database, brand: &str, price_cents: i64) -> i64 {
        let supplier = db
            .suppliers()
            .insert(&NewSupplier {
                name: format!("{} Supplier", brand),
                contact: None,
            })
            .await
            .unwrap();

        db.medicines()
            .insert(&NewMedicine {
                supplier_id: Some(supplier.id),
                brand: brand.to_string(),
                price: Money::from_cents(price_cents),
                expiry_date: date("2027-01-01"),
                manufacture_date: date("2025-01-01"),
            })
            .await
            .unwrap()
            .id
    }
}
