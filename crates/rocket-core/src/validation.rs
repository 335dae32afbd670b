//! # Validation Module
//!
//! Cart invariant checks.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Cart::push / Cart::set_amount                                         │
//! │  └── validate_amount: amount ≥ 1                                       │
//! │                                                                         │
//! │  Snapshot load (Cart::from_items)                                      │
//! │  └── validate_cart: every amount ≥ 1, ids unique                       │
//! │                                                                         │
//! │  Stock checks live in the store: they need a fresh StockRecord.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{LineItem, ProductId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a line item amount.
///
/// ## Example
/// ```rust
/// use rocket_core::validation::validate_amount;
/// use rocket_core::ProductId;
///
/// assert!(validate_amount(ProductId::new(1), 1).is_ok());
/// assert!(validate_amount(ProductId::new(1), 0).is_err());
/// ```
pub fn validate_amount(id: ProductId, amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::NonPositiveAmount { id, amount });
    }
    Ok(())
}

/// Validates a whole item list: positive amounts and unique ids.
pub fn validate_cart(items: &[LineItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        validate_amount(item.id, item.amount)?;
        if !seen.insert(item.id) {
            return Err(ValidationError::DuplicateProduct { id: item.id });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
