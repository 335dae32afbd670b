//! # rocket-core: Pure Cart Logic for Rocket Cart
//!
//! This crate is the **heart** of Rocket Cart. It holds the cart data model
//! and every rule that keeps it consistent, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rocket Cart Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI / CLI                                     │   │
//! │  │    Product list ──► Cart view ──► Quantity picker              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rocket-cart (CartStore)                      │   │
//! │  │    add_product, remove_product, update_product_amount           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rocket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ snapshot  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  encode   │  │  amounts  │  │   │
//! │  │   │ LineItem  │  │  totals   │  │  decode   │  │  unique   │  │   │
//! │  │   │   Cart    │  │           │  │           │  │   ids     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, StockRecord, LineItem, Cart)
//! - [`money`] - Money type with integer arithmetic
//! - [`snapshot`] - Cart snapshot encoding for persistence
//! - [`error`] - Domain error types
//! - [`validation`] - Cart invariant validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rocket_core::{Cart, LineItem, Price, Product, ProductId};
//!
//! let product = Product {
//!     id: ProductId::new(1),
//!     title: "Tênis de Caminhada Leve Confortável".to_string(),
//!     price: Price::from_decimal(179.9).unwrap(),
//!     image: "https://example.com/shoe.jpg".to_string(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.push(LineItem::from_product(product, 2)).unwrap();
//!
//! assert_eq!(cart.totals().subtotal.cents(), 35980);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CartError, CoreResult, SnapshotError, ValidationError};
pub use money::{Money, Price};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot is persisted under.
///
/// Kept identical to the key the web storefront writes to local storage so a
/// snapshot saved by either side loads in the other.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";
