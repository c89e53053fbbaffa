//! # Validation Module
//!
//! Form input validation for Pharmacy Desk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell                                                        │
//! │  └── Collects raw strings, nothing else                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Predicates: validate_name, validate_phone, ...  (→ bool)          │
//! │  ├── Field checks: check_phone, check_price, ...     (→ Result)        │
//! │  └── Form checks: check_customer_form, ...           (→ New* types)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE constraints (phone, email, supplier name+contact)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form checks stop at the first failing field, in form order, so the user
//! sees one actionable message at a time.
//!
//! ## Usage
//! ```rust
//! use pharmacy_core::validation::{validate_email, validate_phone};
//!
//! assert!(validate_phone("0123456789"));
//! assert!(validate_email("ana@pharmacy.co"));
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewCustomer, NewEmployee, NewMedicine, NewSale, NewSupplier};
use crate::{DATE_FORMAT, SUPPLIER_PLACEHOLDER};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Predicates
// =============================================================================

/// Letters and spaces only, and not blank.
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::validate_name;
///
/// assert!(validate_name("Ana Lucia"));
/// assert!(!validate_name("R2D2"));
/// assert!(!validate_name("   "));
/// ```
pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().all(|c| c.is_alphabetic() || c == ' ')
}

/// Exactly ten ASCII decimal digits.
pub fn validate_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// `local@domain.tld` shape.
///
/// ## Rules
/// - local part: one or more of letters, digits, `._%+-`
/// - domain: one or more of letters, digits, `.-`
/// - then a dot and a suffix of two or more ASCII letters
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::validate_email;
///
/// assert!(validate_email("first.last+rx@mail.example.org"));
/// assert!(!validate_email("no-at-sign.com"));
/// assert!(!validate_email("ana@pharmacy.c"));
/// ```
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    if !local_ok {
        return false;
    }

    // The suffix holds no dots, so it always starts after the last one.
    let Some((host, suffix)) = domain.rsplit_once('.') else {
        return false;
    };

    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let suffix_ok = suffix.len() >= 2 && suffix.chars().all(|c| c.is_ascii_alphabetic());

    host_ok && suffix_ok
}

/// `YYYY-MM-DD` shape: 4, 2, and 2 digits separated by hyphens.
///
/// Only the shape is checked here; `2026-02-31` passes and is caught by
/// [`validate_date_order`].
pub fn validate_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// True iff both dates parse and expiry is strictly after manufacture.
///
/// Unparsable input is treated as invalid, never as an error.
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::validate_date_order;
///
/// assert!(validate_date_order("2025-01-01", "2027-01-01"));
/// assert!(!validate_date_order("2025-01-01", "2025-01-01"));
/// assert!(!validate_date_order("2025-02-30", "2027-01-01"));
/// ```
pub fn validate_date_order(manufacture: &str, expiry: &str) -> bool {
    match (parse_date(manufacture), parse_date(expiry)) {
        (Some(manufacture), Some(expiry)) => expiry > manufacture,
        _ => false,
    }
}

/// True iff the text is a finite decimal number greater than zero.
pub fn validate_price(price: &str) -> bool {
    matches!(price.trim().parse::<f64>(), Ok(v) if v.is_finite() && v > 0.0)
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

// =============================================================================
// Field Checks
// =============================================================================

/// Trims a required field, failing if nothing is left.
pub fn require<'a>(field: &'static str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(value)
}

/// Trims an optional field; blank becomes `None`.
pub fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn check_name(field: &'static str, name: &str) -> ValidationResult<()> {
    if !validate_name(name) {
        return Err(ValidationError::LettersOnly { field });
    }
    Ok(())
}

pub fn check_phone(field: &'static str, phone: &str) -> ValidationResult<()> {
    if !validate_phone(phone) {
        return Err(ValidationError::TenDigits { field });
    }
    Ok(())
}

pub fn check_email(field: &'static str, email: &str) -> ValidationResult<()> {
    if !validate_email(email) {
        return Err(ValidationError::Email { field });
    }
    Ok(())
}

/// Parses a price field into cents.
///
/// A value that is positive as typed but rounds to zero cents ("0.001") is
/// rejected the same way as a non-positive one. Amounts of 2^63 cents or
/// more fail with [`ValidationError::TooLarge`].
pub fn check_price(price: &str) -> ValidationResult<Money> {
    let field = "price";
    if !validate_price(price) {
        return Err(ValidationError::MustBePositive { field });
    }

    let amount = Money::parse_decimal(price).ok_or(ValidationError::TooLarge { field })?;
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive { field });
    }
    Ok(amount)
}

/// Checks the manufacture/expiry pair and returns `(manufacture, expiry)`.
pub fn check_medicine_dates(
    manufacture: &str,
    expiry: &str,
) -> ValidationResult<(NaiveDate, NaiveDate)> {
    if !validate_date(expiry) {
        return Err(ValidationError::DateFormat { field: "expiry date" });
    }
    if !validate_date(manufacture) {
        return Err(ValidationError::DateFormat {
            field: "manufacture date",
        });
    }

    match (parse_date(manufacture), parse_date(expiry)) {
        (Some(m), Some(e)) if e > m => Ok((m, e)),
        _ => Err(ValidationError::DateOrder),
    }
}

/// Parses a required numeric id field.
pub fn check_id(field: &'static str, id: &str) -> ValidationResult<i64> {
    require(field, id)?
        .parse()
        .map_err(|_| ValidationError::InvalidId { field })
}

/// Parses a sale quantity (integer > 0).
pub fn check_sale_quantity(quantity: &str) -> ValidationResult<i64> {
    let field = "quantity";
    match require(field, quantity)?.parse::<i64>() {
        Ok(qty) if qty > 0 => Ok(qty),
        _ => Err(ValidationError::MustBePositiveInteger { field }),
    }
}

/// Parses a stock quantity (integer >= 0).
pub fn check_stock_quantity(quantity: &str) -> ValidationResult<i64> {
    let field = "quantity";
    match require(field, quantity)?.parse::<i64>() {
        Ok(qty) if qty >= 0 => Ok(qty),
        _ => Err(ValidationError::MustBeNonNegativeInteger { field }),
    }
}

/// Reads the supplier id out of a picker selection.
///
/// Accepts a `"<id>: <name>"` label or a bare id. A blank selection or the
/// placeholder fails with [`ValidationError::NoSupplierSelected`]. Text with
/// no numeric id yields `None`; it is left to the store's supplier lookup,
/// which is the last medicine check.
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::check_supplier_selection;
///
/// assert_eq!(check_supplier_selection("12: Acme Pharma").unwrap(), Some(12));
/// assert_eq!(check_supplier_selection("12").unwrap(), Some(12));
/// assert_eq!(check_supplier_selection("abc: Acme").unwrap(), None);
/// assert!(check_supplier_selection("Select Supplier").is_err());
/// ```
pub fn check_supplier_selection(selection: &str) -> ValidationResult<Option<i64>> {
    let selection = selection.trim();
    if selection.is_empty() || selection == SUPPLIER_PLACEHOLDER {
        return Err(ValidationError::NoSupplierSelected);
    }

    let id_part = selection.split(':').next().unwrap_or(selection).trim();
    Ok(id_part.parse().ok())
}

// =============================================================================
// Form Checks
// =============================================================================

/// Customer form: name and phone required, address optional.
pub fn check_customer_form(
    name: &str,
    address: Option<&str>,
    phone: &str,
) -> ValidationResult<NewCustomer> {
    let name = require("name", name)?;
    let phone = require("phone", phone)?;

    check_name("name", name)?;
    check_phone("phone", phone)?;

    Ok(NewCustomer {
        name: name.to_string(),
        address: optional(address).map(str::to_string),
        phone: phone.to_string(),
    })
}

/// Employee form: every field required.
pub fn check_employee_form(
    name: &str,
    role: &str,
    email: &str,
    phone: &str,
) -> ValidationResult<NewEmployee> {
    let name = require("name", name)?;
    let role = require("role", role)?;
    let email = require("email", email)?;
    let phone = require("phone", phone)?;

    check_name("name", name)?;
    check_email("email", email)?;
    check_phone("phone", phone)?;

    Ok(NewEmployee {
        name: name.to_string(),
        role: role.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    })
}

/// Supplier form: name required, contact checked only when present.
pub fn check_supplier_form(name: &str, contact: Option<&str>) -> ValidationResult<NewSupplier> {
    let name = require("name", name)?;
    check_name("name", name)?;

    let contact = optional(contact);
    if let Some(contact) = contact {
        check_phone("contact", contact)?;
    }

    Ok(NewSupplier {
        name: name.to_string(),
        contact: contact.map(str::to_string),
    })
}

/// Medicine form. Supplier existence is a store lookup and is not checked here.
pub fn check_medicine_form(
    supplier: &str,
    brand: &str,
    price: &str,
    expiry: &str,
    manufacture: &str,
) -> ValidationResult<NewMedicine> {
    let supplier_id = check_supplier_selection(supplier)?;

    let brand = require("brand", brand)?;
    let price = require("price", price)?;
    let expiry = require("expiry date", expiry)?;
    let manufacture = require("manufacture date", manufacture)?;

    let price = check_price(price)?;
    let (manufacture_date, expiry_date) = check_medicine_dates(manufacture, expiry)?;

    Ok(NewMedicine {
        supplier_id,
        brand: brand.to_string(),
        price,
        expiry_date,
        manufacture_date,
    })
}

/// Sale form: customer, medicine and quantity all required.
pub fn check_sale_form(customer: &str, medicine: &str, quantity: &str) -> ValidationResult<NewSale> {
    require("customer id", customer)?;
    require("medicine id", medicine)?;
    require("quantity", quantity)?;

    let quantity = check_sale_quantity(quantity)?;
    let customer_id = check_id("customer id", customer)?;
    let medicine_id = check_id("medicine id", medicine)?;

    Ok(NewSale {
        customer_id,
        medicine_id,
        quantity,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ana"));
        assert!(validate_name("Ana Lucia Perez"));
        assert!(validate_name("José"));

        assert!(!validate_name(""));
        assert!(!validate_name("   "));
        assert!(!validate_name("Ana-Lucia"));
        assert!(!validate_name("Agent 007"));
    }

    #[test]
    fn test_validate_phone_accepts_every_ten_digit_string() {
        for seed in [0u64, 1, 42, 1_234_567_890, 9_999_999_999] {
            let phone = format!("{:010}", seed);
            assert!(validate_phone(&phone), "{phone} should be accepted");
        }
    }

    #[test]
    fn test_validate_phone_rejects_wrong_length_or_non_digits() {
        for len in (0..=15).filter(|l| *l != 10) {
            assert!(!validate_phone(&"5".repeat(len)), "length {len} accepted");
        }
        assert!(!validate_phone("012345678a"));
        assert!(!validate_phone("012345 789"));
        assert!(!validate_phone("+123456789"));
        assert!(!validate_phone("٠١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@pharmacy.com"));
        assert!(validate_email("a.b_c%d+e-f@sub.domain-x.io"));
        assert!(validate_email("x@a.b.cd"));

        assert!(!validate_email(""));
        assert!(!validate_email("@pharmacy.com"));
        assert!(!validate_email("ana@"));
        assert!(!validate_email("ana@pharmacy"));
        assert!(!validate_email("ana@.com"));
        assert!(!validate_email("ana@pharmacy.c0m"));
        assert!(!validate_email("ana@@pharmacy.com"));
        assert!(!validate_email("ana lucia@pharmacy.com"));
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2026-10-19"));
        assert!(validate_date("2026-02-31"));

        assert!(!validate_date("2026-1-19"));
        assert!(!validate_date("26-10-19"));
        assert!(!validate_date("2026/10/19"));
        assert!(!validate_date("2026-10-19 "));
    }

    #[test]
    fn test_validate_date_order() {
        assert!(validate_date_order("2025-12-31", "2026-01-01"));
        assert!(!validate_date_order("2026-01-01", "2026-01-01"));
        assert!(!validate_date_order("2026-01-02", "2026-01-01"));

        // Fails closed on anything unparsable.
        assert!(!validate_date_order("garbage", "2026-01-01"));
        assert!(!validate_date_order("2025-01-01", "2026-13-01"));
        assert!(!validate_date_order("", ""));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("12.50"));
        assert!(validate_price("0.01"));
        assert!(validate_price(" 3 "));

        assert!(!validate_price("0"));
        assert!(!validate_price("-1"));
        assert!(!validate_price("abc"));
        assert!(!validate_price("inf"));
    }

    #[test]
    fn test_check_price_rejects_sub_cent() {
        assert_eq!(check_price("12.5").unwrap().cents(), 1250);
        assert_eq!(
            check_price("0.001"),
            Err(ValidationError::MustBePositive { field: "price" })
        );
    }

    #[test]
    fn test_check_price_reports_overflow_separately() {
        assert_eq!(
            check_price("1e17"),
            Err(ValidationError::TooLarge { field: "price" })
        );
        assert_eq!(
            ValidationError::TooLarge { field: "price" }.to_string(),
            "price is too large"
        );
        assert!(check_price("1e15").is_ok());
    }

    #[test]
    fn test_check_customer_form_order() {
        assert_eq!(
            check_customer_form("", None, ""),
            Err(ValidationError::Required { field: "name" })
        );
        assert_eq!(
            check_customer_form("Ana", None, "  "),
            Err(ValidationError::Required { field: "phone" })
        );
        assert_eq!(
            check_customer_form("Ana1", None, "123"),
            Err(ValidationError::LettersOnly { field: "name" })
        );
        assert_eq!(
            check_customer_form("Ana", None, "123"),
            Err(ValidationError::TenDigits { field: "phone" })
        );

        let customer = check_customer_form(" Ana ", Some("  "), "0123456789").unwrap();
        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.address, None);
    }

    #[test]
    fn test_check_employee_form_checks_email_before_phone() {
        assert_eq!(
            check_employee_form("Ana", "", "ana@x.com", "0123456789"),
            Err(ValidationError::Required { field: "role" })
        );
        assert_eq!(
            check_employee_form("Ana", "Pharmacist", "ana", "12"),
            Err(ValidationError::Email { field: "email" })
        );
        assert_eq!(
            check_employee_form("Ana", "Pharmacist", "ana@x.com", "12"),
            Err(ValidationError::TenDigits { field: "phone" })
        );
        assert!(check_employee_form("Ana", "Pharmacist", "ana@x.com", "0123456789").is_ok());
    }

    #[test]
    fn test_check_supplier_form_optional_contact() {
        let supplier = check_supplier_form("Acme", Some("")).unwrap();
        assert_eq!(supplier.contact, None);

        assert_eq!(
            check_supplier_form("Acme", Some("12345")),
            Err(ValidationError::TenDigits { field: "contact" })
        );
        assert_eq!(
            check_supplier_form(" ", None),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn test_check_medicine_form() {
        let medicine =
            check_medicine_form("3: Acme", "Aspirin", "2.50", "2027-06-01", "2025-06-01").unwrap();
        assert_eq!(medicine.supplier_id, Some(3));
        assert_eq!(medicine.price.cents(), 250);
        assert!(medicine.expiry_date > medicine.manufacture_date);

        assert_eq!(
            check_medicine_form("Select Supplier", "Aspirin", "2.50", "2027-06-01", "2025-06-01"),
            Err(ValidationError::NoSupplierSelected)
        );
        assert_eq!(
            check_medicine_form("abc: Acme", "Aspirin", "2.50", "2027-06-01", "2025-06-01")
                .unwrap()
                .supplier_id,
            None
        );
        assert_eq!(
            check_medicine_form("abc", "", "2.50", "2027-06-01", "2025-06-01"),
            Err(ValidationError::Required { field: "brand" })
        );
        assert_eq!(
            check_medicine_form("3", "Aspirin", "0", "2027-06-01", "2025-06-01"),
            Err(ValidationError::MustBePositive { field: "price" })
        );
        assert_eq!(
            check_medicine_form("3", "Aspirin", "2.50", "06/01/2027", "2025-06-01"),
            Err(ValidationError::DateFormat { field: "expiry date" })
        );
        assert_eq!(
            check_medicine_form("3", "Aspirin", "2.50", "2025-06-01", "2027-06-01"),
            Err(ValidationError::DateOrder)
        );
        assert_eq!(
            check_medicine_form("3", "Aspirin", "2.50", "2027-02-30", "2025-06-01"),
            Err(ValidationError::DateOrder)
        );
    }

    #[test]
    fn test_check_sale_form() {
        let sale = check_sale_form("1", "2", "3").unwrap();
        assert_eq!((sale.customer_id, sale.medicine_id, sale.quantity), (1, 2, 3));

        assert_eq!(
            check_sale_form("1", "", "3"),
            Err(ValidationError::Required { field: "medicine id" })
        );
        assert_eq!(
            check_sale_form("1", "2", "0"),
            Err(ValidationError::MustBePositiveInteger { field: "quantity" })
        );
        assert_eq!(
            check_sale_form("1", "2", "1.5"),
            Err(ValidationError::MustBePositiveInteger { field: "quantity" })
        );
        assert_eq!(
            check_sale_form("one", "2", "3"),
            Err(ValidationError::InvalidId { field: "customer id" })
        );
    }

    #[test]
    fn test_check_stock_quantity() {
        assert_eq!(check_stock_quantity("0"), Ok(0));
        assert_eq!(check_stock_quantity(" 12 "), Ok(12));
        assert_eq!(
            check_stock_quantity("-1"),
            Err(ValidationError::MustBeNonNegativeInteger { field: "quantity" })
        );
    }
}
