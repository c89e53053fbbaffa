//! # Pharmacy Desk Entry Point
//!
//! Command-line shell over the desk commands.
//!
//! ## Usage
//! ```text
//! pharmacy-desk supplier add --name "Acme Labs" --contact 0212345678
//! pharmacy-desk supplier choices
//! pharmacy-desk medicine add --supplier "1: Acme Labs" --brand Aspirin \
//!     --price 2.50 --expiry 2027-01-01 --manufacture 2025-01-01
//! pharmacy-desk stock set 1 20
//! pharmacy-desk sale record 1 1 3
//! pharmacy-desk stock low --threshold 10
//! pharmacy-desk --json customer list
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (`PHARMACY_*`, then `--db`)
//! 4. Open the database and create missing tables
//! 5. Run one command, print its result, exit non-zero on error

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use pharmacy_desk_lib::commands::{
    config, customer, employee, medicine, sale, stock, supplier, Added, Deleted,
};
use pharmacy_desk_lib::error::ApiError;
use pharmacy_desk_lib::state::{ConfigState, DbState};
use pharmacy_desk_lib::{init_tracing, open_database};

// =============================================================================
// CLI Arguments
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "pharmacy-desk", version, about = "Pharmacy data-entry desk")]
struct Args {
    /// SQLite database file (default: platform data directory).
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Print results and errors as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Customer records
    #[command(subcommand)]
    Customer(CustomerCommand),

    /// Staff records
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Supplier records
    #[command(subcommand)]
    Supplier(SupplierCommand),

    /// Medicine catalogue
    #[command(subcommand)]
    Medicine(MedicineCommand),

    /// Stock levels
    #[command(subcommand)]
    Stock(StockCommand),

    /// Sales
    #[command(subcommand)]
    Sale(SaleCommand),

    /// Database health and row counts
    Status,

    /// Effective configuration
    Config,
}

// Form fields default to "" so that a missing value is reported by the
// desk's own validation, in its own order.

#[derive(Subcommand, Debug)]
enum CustomerCommand {
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, default_value = "")]
        phone: String,
    },
    Delete {
        #[arg(default_value = "")]
        id: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    Delete {
        #[arg(default_value = "")]
        id: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum SupplierCommand {
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        contact: Option<String>,
    },
    List,
    /// Picker entries ("<id>: <name>"), ordered by name
    Choices,
}

#[derive(Subcommand, Debug)]
enum MedicineCommand {
    Add {
        /// Picker label ("3: Acme") or bare supplier id
        #[arg(long, default_value = "")]
        supplier: String,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long, default_value = "")]
        price: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        expiry: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        manufacture: String,
    },
    /// Delete a medicine and its stock row
    Delete {
        #[arg(default_value = "")]
        id: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum StockCommand {
    /// Set the absolute quantity for a medicine
    Set {
        #[arg(default_value = "")]
        medicine_id: String,
        #[arg(default_value = "")]
        quantity: String,
    },
    List,
    /// Rows strictly below the threshold, lowest first
    Low {
        #[arg(long)]
        threshold: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
enum SaleCommand {
    /// Record a sale and take the units out of stock
    Record {
        #[arg(default_value = "")]
        customer_id: String,
        #[arg(default_value = "")]
        medicine_id: String,
        #[arg(default_value = "")]
        quantity: String,
    },
    List,
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let mut config = ConfigState::from_env();
    if let Some(path) = args.db.clone() {
        config.database_path = Some(path);
    }

    let json = args.json;
    match run(args.command, &config, json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(text) => println!("{}", text),
                    Err(_) => eprintln!("Error: {}", err),
                }
            } else {
                eprintln!("Error: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &ConfigState, json: bool) -> Result<(), ApiError> {
    // Needs no database
    if let Command::Config = command {
        return show_config(config, json);
    }

    let db = open_database(config).await?;
    let result = dispatch(command, &db, config, json).await;
    db.inner().close().await;
    result
}

async fn dispatch(
    command: Command,
    db: &DbState,
    config: &ConfigState,
    json: bool,
) -> Result<(), ApiError> {
    match command {
        Command::Customer(cmd) => match cmd {
            CustomerCommand::Add {
                name,
                address,
                phone,
            } => {
                let request = customer::NewCustomerRequest {
                    name,
                    address,
                    phone,
                };
                emit(json, &customer::add_customer(db, request).await?, print_added)
            }
            CustomerCommand::Delete { id } => {
                emit(json, &customer::delete_customer(db, &id).await?, print_deleted)
            }
            CustomerCommand::List => emit(json, &customer::list_customers(db).await?, |rows| {
                for c in rows {
                    println!(
                        "{:>4}  {:<24} {:<10}  {}",
                        c.id,
                        c.name,
                        c.phone,
                        c.address.as_deref().unwrap_or("")
                    );
                }
            }),
        },

        Command::Employee(cmd) => match cmd {
            EmployeeCommand::Add {
                name,
                role,
                email,
                phone,
            } => {
                let request = employee::NewEmployeeRequest {
                    name,
                    role,
                    email,
                    phone,
                };
                emit(json, &employee::add_employee(db, request).await?, print_added)
            }
            EmployeeCommand::Delete { id } => {
                emit(json, &employee::delete_employee(db, &id).await?, print_deleted)
            }
            EmployeeCommand::List => emit(json, &employee::list_employees(db).await?, |rows| {
                for e in rows {
                    println!(
                        "{:>4}  {:<24} {:<14} {:<28} {}",
                        e.id, e.name, e.role, e.email, e.phone
                    );
                }
            }),
        },

        Command::Supplier(cmd) => match cmd {
            SupplierCommand::Add { name, contact } => {
                let request = supplier::NewSupplierRequest { name, contact };
                emit(json, &supplier::add_supplier(db, request).await?, print_added)
            }
            SupplierCommand::List => emit(json, &supplier::list_suppliers(db).await?, |rows| {
                for s in rows {
                    println!(
                        "{:>4}  {:<28} {}",
                        s.id,
                        s.name,
                        s.contact.as_deref().unwrap_or("")
                    );
                }
            }),
            SupplierCommand::Choices => {
                emit(json, &supplier::supplier_choices(db).await?, |rows| {
                    println!("{}", pharmacy_core::SUPPLIER_PLACEHOLDER);
                    for choice in rows {
                        println!("{}", choice.label);
                    }
                })
            }
        },

        Command::Medicine(cmd) => match cmd {
            MedicineCommand::Add {
                supplier,
                brand,
                price,
                expiry,
                manufacture,
            } => {
                let request = medicine::NewMedicineRequest {
                    supplier,
                    brand,
                    price,
                    expiry_date: expiry,
                    manufacture_date: manufacture,
                };
                emit(json, &medicine::add_medicine(db, request).await?, print_added)
            }
            MedicineCommand::Delete { id } => {
                emit(json, &medicine::delete_medicine(db, &id).await?, print_deleted)
            }
            MedicineCommand::List => {
                emit(json, &medicine::list_medicines(db, config).await?, |rows| {
                    for m in rows {
                        println!(
                            "{:>4}  {:<28} {:>10}  supplier {:<4} mfg {}  exp {}",
                            m.medicine.id,
                            m.medicine.brand,
                            m.price,
                            m.medicine.supplier_id,
                            m.medicine.manufacture_date,
                            m.medicine.expiry_date
                        );
                    }
                })
            }
        },

        Command::Stock(cmd) => match cmd {
            StockCommand::Set {
                medicine_id,
                quantity,
            } => {
                let request = stock::SetStockRequest {
                    medicine_id,
                    quantity,
                };
                emit(json, &stock::set_stock(db, request).await?, |s| {
                    println!("{}", s.message)
                })
            }
            StockCommand::List => emit(json, &stock::list_stock(db).await?, |rows| {
                for s in rows {
                    println!(
                        "medicine {:>4}  qty {:>6}  updated {}",
                        s.medicine_id, s.quantity, s.last_updated
                    );
                }
            }),
            StockCommand::Low { threshold } => {
                let rows = stock::list_low_stock(db, config, threshold).await?;
                emit(json, &rows, |rows| {
                    if rows.is_empty() {
                        println!("No medicines below the low-stock line");
                    }
                    for r in rows {
                        println!(
                            "{:>4}  {:<28} qty {:>4}  updated {}",
                            r.medicine_id, r.brand, r.quantity, r.last_updated
                        );
                    }
                })
            }
        },

        Command::Sale(cmd) => match cmd {
            SaleCommand::Record {
                customer_id,
                medicine_id,
                quantity,
            } => {
                let request = sale::NewSaleRequest {
                    customer_id,
                    medicine_id,
                    quantity,
                };
                emit(json, &sale::record_sale(db, config, request).await?, |s| {
                    println!("{}", s.message)
                })
            }
            SaleCommand::List => emit(json, &sale::list_sales(db).await?, |rows| {
                for s in rows {
                    println!(
                        "{:>4}  {}  customer {:<4} medicine {:<4} qty {:>4}  {}",
                        s.id,
                        s.sale_date,
                        s.customer_id,
                        s.medicine_id,
                        s.quantity,
                        config.format_currency(s.total())
                    );
                }
            }),
        },

        Command::Status => emit(json, &config::status(db, config).await?, |s| {
            println!("{}", s.store_name);
            println!(
                "Database:   {}",
                if s.healthy { "ok" } else { "unreachable" }
            );
            for t in &s.tables {
                println!("  {:<10} {:>6} rows", t.table, t.rows);
            }
        }),

        Command::Config => show_config(config, json),
    }
}

// =============================================================================
// Output
// =============================================================================

fn show_config(config: &ConfigState, json: bool) -> Result<(), ApiError> {
    emit(json, &config::get_config(config), |c| {
        println!("Store:      {}", c.store_name);
        println!("Low stock:  below {}", c.low_stock_threshold);
        match &c.database_path {
            Some(path) => println!("Database:   {}", path.display()),
            None => println!("Database:   (platform data directory)"),
        }
    })
}

/// Prints `value` as pretty JSON, or hands it to `human` for plain text.
fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> Result<(), ApiError> {
    if json {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Could not encode output: {}", e)))?;
        println!("{}", text);
    } else {
        human(value);
    }
    Ok(())
}

fn print_added(added: &Added) {
    println!("{} (id {})", added.message, added.id);
}

fn print_deleted(deleted: &Deleted) {
    println!("{}", deleted.message);
}
