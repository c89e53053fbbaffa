//! # Demo Data Seeder
//!
//! Fills a fresh database with suppliers, medicines and stock so the desk
//! has something to show, including a few rows below the low-stock line.
//!
//! ## Usage
//! ```bash
//! cargo run -p pharmacy-db --bin seed
//!
//! # Specify database path
//! cargo run -p pharmacy-db --bin seed -- --db ./data/pharmacy.db
//! ```

use std::env;

use pharmacy_core::validation::{check_medicine_form, check_supplier_form};
use pharmacy_db::{today, Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// (name, contact)
const SUPPLIERS: &[(&str, Option<&str>)] = &[
    ("Acme Pharmaceuticals", Some("0212345678")),
    ("Northwind Health", Some("0387654321")),
    ("Bluebell Generics", None),
];

/// (supplier index, brand, price, expiry, manufacture, units in stock)
const MEDICINES: &[(usize, &str, &str, &str, &str, &str)] = &[
    (0, "Paracetamol 500mg", "3.49", "2027-03-31", "2025-03-01", "120"),
    (0, "Ibuprofen 200mg", "4.99", "2027-06-30", "2025-06-01", "3"),
    (1, "Cetirizine 10mg", "6.25", "2026-12-31", "2025-01-15", "0"),
    (1, "Amoxicillin 250mg", "12.80", "2026-09-30", "2025-02-10", "40"),
    (2, "Loratadine 10mg", "5.10", "2027-01-31", "2025-01-31", "4"),
    (2, "Omeprazole 20mg", "8.75", "2027-08-31", "2025-08-01", "25"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./pharmacy_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pharmacy Desk Demo Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./pharmacy_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    // Quiet unless RUST_LOG asks for more
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("Pharmacy Desk Demo Seeder");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, schema ready");

    let existing = db.medicines().list().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} medicines", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut supplier_ids = Vec::with_capacity(SUPPLIERS.len());
    for (name, contact) in SUPPLIERS {
        let supplier = db.suppliers().insert(&check_supplier_form(name, *contact)?).await?;
        println!("  + supplier {}: {}", supplier.id, supplier.name);
        supplier_ids.push(supplier.id);
    }

    let day = today();
    for (supplier_idx, brand, price, expiry, manufacture, units) in MEDICINES {
        let selection = format!("{}: {}", supplier_ids[*supplier_idx], SUPPLIERS[*supplier_idx].0);
        let new_medicine = check_medicine_form(&selection, brand, price, expiry, manufacture)?;
        let medicine = db.medicines().insert(&new_medicine).await?;

        let quantity: i64 = units.parse()?;
        db.stock().set(medicine.id, quantity, day).await?;

        println!(
            "  + medicine {}: {} @ {} ({} in stock)",
            medicine.id,
            medicine.brand,
            medicine.price(),
            quantity
        );
    }

    let low = db.stock().list_low_stock(pharmacy_core::DEFAULT_LOW_STOCK_THRESHOLD).await?;
    println!();
    println!("✓ Seed complete! {} medicines below the low-stock line", low.len());

    db.close().await;
    Ok(())
}
