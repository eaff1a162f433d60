//! # Validation Module
//!
//! Boundary checks for values entering a `CartState`.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog ──► Product ──► validate_product() ──► CartState::add_item     │
//! │                                                                         │
//! │  Storage ──► JSON ──► Vec<LineItem> ──► validate_line_items()           │
//! │                                              │                          │
//! │                                   fail ──────┴──► empty cart            │
//! │                                                                         │
//! │  Anything that passes these checks upholds the CartState invariants:   │
//! │  non-empty id + name, quantity ≥ 1, ids unique.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopcart_core::validation::{validate_product, validate_quantity};
//! use shopcart_core::{Money, Product};
//!
//! let lamp = Product::new("1", "Lamp", Money::from_cents(2000), "lamp.png");
//! assert!(validate_product(&lamp).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{LineItem, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an identifier: any non-empty string.
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::required("id"));
    }
    Ok(())
}

/// Validates a display name: any non-empty string.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }
    Ok(())
}

/// Validates a price for a product being added: must be positive.
///
/// ```rust
/// use shopcart_core::validation::validate_price;
/// use shopcart_core::Money;
///
/// assert!(validate_price(Money::from_cents(2000)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::must_be_positive("price"));
    }
    Ok(())
}

/// Validates a line item quantity: must be ≥ 1.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product before it is added to a cart.
///
/// ## Rules
/// - `id` and `name` non-empty
/// - `price` positive
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_id(&product.id)?;
    validate_name(&product.name)?;
    validate_price(product.price)?;
    Ok(())
}

/// Validates a single line item.
///
/// Hydrated prices only need to be numbers (which the type guarantees), so a
/// persisted zero-priced line is accepted here even though `add_item` would
/// refuse to create one.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_id(&item.id)?;
    validate_name(&item.name)?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validates a full line item list, including id uniqueness.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_line_item(item)?;
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: item.id.clone(),
            });
        }
    }
    Ok(())
}

/// Boolean form of [`validate_line_items`].
pub fn is_valid_line_items(items: &[LineItem]) -> bool {
    validate_line_items(items).is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
