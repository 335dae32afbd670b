//! # Cart Snapshots
//!
//! The snapshot is the cart serialized as a JSON array of line items:
//!
//! ```json
//! [
//!   { "id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "https://...", "amount": 2 }
//! ]
//! ```
//!
//! Decoding validates the invariants, so a snapshot that decodes is a cart
//! the store may adopt as-is.

use crate::error::SnapshotError;
use crate::types::{Cart, LineItem};

/// Serializes a cart to its snapshot form.
pub fn encode(cart: &Cart) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(cart)?)
}

/// Parses and validates a snapshot.
///
/// ## Example
/// ```rust
/// use rocket_core::snapshot;
///
/// let cart = snapshot::decode(r#"[{"id":1,"title":"Runner","price":99.9,"image":"","amount":2}]"#).unwrap();
/// assert_eq!(cart.total_quantity(), 2);
///
/// assert!(snapshot::decode(r#"[{"id":1,"title":"Runner","price":99.9,"image":"","amount":0}]"#).is_err());
/// ```
pub fn decode(blob: &str) -> Result<Cart, SnapshotError> {
    let items: Vec<LineItem> = serde_json::from_str(blob)?;
    Ok(Cart::from_items(items)?)
}

// =============================================================================
// Unit Tests
// =============================================================================
