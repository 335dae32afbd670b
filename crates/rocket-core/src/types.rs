//! # Domain Types
//!
//! Core domain types used throughout Rocket Cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   StockRecord   │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  title          │   │  amount (max)   │   │  title, price,  │       │
//! │  │  price          │   └─────────────────┘   │  image (copied) │       │
//! │  │  image          │                         │  amount (≥ 1)   │       │
//! │  └─────────────────┘                         └────────┬────────┘       │
//! │                                                       │                 │
//! │                                              ┌────────▼────────┐       │
//! │                                              │      Cart       │       │
//! │                                              │  ordered,       │       │
//! │                                              │  unique by id   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CartError, CoreResult, ValidationError};
use crate::money::{Money, Price};
use crate::validation::{validate_amount, validate_cart};

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product record as served by `products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[ts(type = "number")]
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price, as served.
    #[ts(type = "number")]
    pub price: Price,

    /// Image URL.
    pub image: String,
}

// =============================================================================
// Stock Record
// =============================================================================

/// Maximum purchasable quantity for a product, as served by `stock/{id}`.
///
/// Never cached: every operation that needs it fetches a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockRecord {
    #[ts(type = "number")]
    pub id: ProductId,

    pub amount: i64,
}

impl StockRecord {
    /// Returns true if `requested` units can be purchased.
    #[inline]
    pub fn covers(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart.
///
/// ## Design Notes
/// The product metadata is a frozen copy taken when the line was created;
/// later quantity changes do not refresh it. The serialized form is the
/// product record with an `amount` field added, which is what the web
/// storefront keeps in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[ts(type = "number")]
    pub id: ProductId,

    pub title: String,

    #[ts(type = "number")]
    pub price: Price,

    pub image: String,

    /// Quantity in cart (always ≥ 1 once stored).
    pub amount: i64,
}

impl LineItem {
    /// Creates a line item from a product record and quantity.
    pub fn from_product(product: Product, amount: i64) -> Self {
        LineItem {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Calculates the line total (unit price × amount), in cents.
    pub fn line_total(&self) -> Money {
        self.price.times(self.amount)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id`
/// - Every amount is ≥ 1
/// - Insertion order is preserved; new items go to the end
///
/// Serializes as a bare JSON array of line items. Deserializing goes
/// through [`Cart::from_items`], so a decoded cart holds the same
/// invariants as a built one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from raw items, checking every invariant.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, ValidationError> {
        validate_cart(&items)?;
        Ok(Cart { items })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Looks up the line item for a product.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the current amount for a product, if present.
    pub fn amount_of(&self, id: ProductId) -> Option<i64> {
        self.get(id).map(|item| item.amount)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a new line item.
    ///
    /// ## Returns
    /// - `Err(DuplicateProduct)` if the product is already in the cart
    /// - `Err(NonPositiveAmount)` if the amount is below 1
    pub fn push(&mut self, item: LineItem) -> Result<(), ValidationError> {
        validate_amount(item.id, item.amount)?;
        if self.contains(item.id) {
            return Err(ValidationError::DuplicateProduct { id: item.id });
        }
        self.items.push(item);
        Ok(())
    }

    /// Sets the amount of an existing line item.
    ///
    /// ## Returns
    /// - `Ok(true)` if the item was found and updated
    /// - `Ok(false)` if the product is not in the cart
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> Result<bool, ValidationError> {
        validate_amount(id, amount)?;
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.amount = amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns a copy of this cart without the given product.
    ///
    /// Fails with `ProductAbsentOnRemove` when nothing matched.
    pub fn without(&self, id: ProductId) -> CoreResult<Cart> {
        let items: Vec<LineItem> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();

        if items.len() == self.items.len() {
            return Err(CartError::ProductAbsentOnRemove { id });
        }

        Ok(Cart { items })
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of every line total.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = ValidationError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart summary for renderers (header badge, checkout footer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products in the cart.
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
