//! # Validation Module
//!
//! Input validation for everything the stores accept.
//!
//! The repositories call these before touching the database, the database
//! CHECK constraints are the second line. Rules are intentionally small:
//! required names, non-negative money, positive quantities.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NewCustomer, NewExpense, NewProduct, NewSupplier, SaleRequest};

/// Names (product, supplier, customer) are capped at the schema's length.
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required name field: non-empty after trimming, bounded length.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a sale or stock quantity: strictly positive.
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary value that may be zero but never negative
/// (prices, expense amounts).
pub fn validate_money_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a count that may be zero but never negative
/// (initial stock, reorder levels).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an entity id: non-empty, parseable as a UUID.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a product creation input.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_money_cents("buying_price", input.buying_price_cents)?;
    validate_money_cents("selling_price", input.selling_price_cents)?;
    validate_non_negative("quantity", input.quantity)?;
    if let Some(level) = input.reorder_level {
        validate_non_negative("reorder_level", level)?;
    }
    Ok(())
}

/// Validates a supplier creation input. Only the name is required.
pub fn validate_new_supplier(input: &NewSupplier) -> ValidationResult<()> {
    validate_name("name", &input.name)
}

/// Validates a customer creation input. Only the name is required.
pub fn validate_new_customer(input: &NewCustomer) -> ValidationResult<()> {
    validate_name("name", &input.name)
}

/// Validates an expense creation input.
pub fn validate_new_expense(input: &NewExpense) -> ValidationResult<()> {
    validate_money_cents("amount", input.amount_cents)
}

/// Validates a sale request before the ledger opens a transaction.
pub fn validate_sale_request(request: &SaleRequest) -> ValidationResult<()> {
    if request.product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }
    validate_quantity("quantity", request.quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
