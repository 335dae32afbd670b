//! # Cart Store
//!
//! The single source of truth for the cart. One `CartStore` is opened at
//! start-up and cloned into every consumer.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action              Operation                  Inventory calls      │
//! │  ─────────              ─────────                  ───────────────      │
//! │                                                                         │
//! │  Click "Add" ─────────► add_product(id) ─────────► product, stock      │
//! │                           └─► amount = current + 1 (or 1)              │
//! │                                                                         │
//! │  Change quantity ─────► update_product_amount() ─► stock (+ product    │
//! │                           amount ≤ 0 → no-op          if not in cart)  │
//! │                                                                         │
//! │  Click "Remove" ──────► remove_product(id) ──────► none                │
//! │                                                                         │
//! │  Checkout done ───────► clear() ─────────────────► none                │
//! │                                                                         │
//! │  Every write holds the writer lock from the first read of the cart     │
//! │  until the commit, so concurrent calls never work on a stale cart.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commit
//! A commit publishes the new cart to subscribers and then, in the same
//! critical section, writes the snapshot if it differs from the last one
//! written. Opening the store never writes.

use std::fmt;
use std::sync::Arc;

use rocket_core::{
    snapshot, Cart, CartError, CartTotals, CoreResult, LineItem, Product, ProductId,
    CART_STORAGE_KEY,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::inventory::InventoryClient;
use crate::notify::{message_for, Notifier, Operation};
use crate::storage::BlobStore;

// =============================================================================
// Requests and outcomes
// =============================================================================

/// Absolute quantity change for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Desired quantity (not a delta). `<= 0` is a no-op.
    pub amount: i64,
}

/// What an operation did to the cart.
///
/// Rejections have already been reported through the [`Notifier`] by the
/// time the caller sees them; callers that only render the cart can ignore
/// the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "ignore explicitly with `let _ =` if only the cart matters"]
pub enum CartOutcome {
    /// The cart changed.
    Committed,
    /// Nothing to do; the cart is unchanged.
    Unchanged,
    /// The operation was refused; the cart is unchanged.
    Rejected(CartError),
}

impl CartOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CartOutcome::Committed)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, CartOutcome::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&CartError> {
        match self {
            CartOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

// =============================================================================
// CartStore
// =============================================================================

/// Shared handle to the session cart. Cloning is cheap.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    inventory: Arc<dyn InventoryClient>,
    storage: Arc<dyn BlobStore>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Cart>,
    writer: Mutex<Persisted>,
}

/// Last cart known to be in storage. Only touched under the writer lock.
struct Persisted {
    cart: Cart,
}

impl CartStore {
    /// Opens the session cart from its persisted snapshot.
    ///
    /// A missing snapshot starts an empty cart. An unreadable or invalid one
    /// is discarded with a warning. Nothing is written.
    pub fn open(
        inventory: Arc<dyn InventoryClient>,
        storage: Arc<dyn BlobStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = load_snapshot(storage.as_ref());
        let (state, _) = watch::channel(cart.clone());

        CartStore {
            inner: Arc::new(Inner {
                inventory,
                storage,
                notifier,
                state,
                writer: Mutex::new(Persisted { cart }),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a copy of the current cart.
    pub fn cart(&self) -> Cart {
        self.inner.state.borrow().clone()
    }

    /// Subscribes to cart changes. The receiver starts at the current cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.state.subscribe()
    }

    pub fn totals(&self) -> CartTotals {
        self.inner.state.borrow().totals()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// Takes the same stock-checked path whether or not the cart is empty.
    pub async fn add_product(&self, product_id: ProductId) -> CartOutcome {
        debug!(%product_id, "add_product");
        let mut persisted = self.inner.writer.lock().await;
        let result = self.try_add(&mut persisted, product_id).await;
        self.finish(Operation::Add, result)
    }

    /// Removes a product's line entirely.
    pub async fn remove_product(&self, product_id: ProductId) -> CartOutcome {
        debug!(%product_id, "remove_product");
        let mut persisted = self.inner.writer.lock().await;
        let result = self
            .cart()
            .without(product_id)
            .map(|next| self.commit(&mut persisted, next));
        self.finish(Operation::Remove, result)
    }

    /// Sets a product's quantity, checking it against current stock.
    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> CartOutcome {
        let UpdateProductAmount { product_id, amount } = request;
        debug!(%product_id, amount, "update_product_amount");

        if amount <= 0 {
            return CartOutcome::Unchanged;
        }

        let mut persisted = self.inner.writer.lock().await;
        let result = self
            .apply_amount(&mut persisted, product_id, amount, None)
            .await;
        self.finish(Operation::Update, result)
    }

    /// Empties the cart.
    pub async fn clear(&self) -> CartOutcome {
        debug!("clear");
        let mut persisted = self.inner.writer.lock().await;
        self.commit(&mut persisted, Cart::new())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn try_add(&self, persisted: &mut Persisted, id: ProductId) -> CoreResult<CartOutcome> {
        let product = self.inner.inventory.fetch_product(id).await?;
        let amount = self
            .cart()
            .amount_of(id)
            .map_or(1, |current| current.saturating_add(1));

        self.apply_amount(persisted, id, amount, Some(product)).await
    }

    /// Stock-checks `amount` and writes it into a copy of the latest cart.
    ///
    /// `product` is used for a new line instead of fetching it again.
    async fn apply_amount(
        &self,
        persisted: &mut Persisted,
        id: ProductId,
        amount: i64,
        product: Option<Product>,
    ) -> CoreResult<CartOutcome> {
        if amount <= 0 {
            return Ok(CartOutcome::Unchanged);
        }

        let stock = self.inner.inventory.fetch_stock(id).await?;
        if !stock.covers(amount) {
            return Err(CartError::OutOfStock {
                id,
                available: stock.amount,
                requested: amount,
            });
        }

        let mut next = self.cart();
        if !next.set_amount(id, amount)? {
            let product = match product {
                Some(product) => product,
                None => self.inner.inventory.fetch_product(id).await?,
            };
            next.push(LineItem::from_product(product, amount))?;
        }

        Ok(self.commit(persisted, next))
    }

    /// Publishes `next` and persists it.
    fn commit(&self, persisted: &mut Persisted, next: Cart) -> CartOutcome {
        let unchanged = *self.inner.state.borrow() == next;
        if unchanged {
            debug!("Cart unchanged, nothing to commit");
            return CartOutcome::Unchanged;
        }

        info!(
            items = next.len(),
            quantity = next.total_quantity(),
            "Cart committed"
        );
        self.inner.state.send_replace(next.clone());
        self.persist(persisted, next);

        CartOutcome::Committed
    }

    /// Writes the snapshot when it differs from the last one written.
    ///
    /// A failed write is logged and leaves `persisted` as it was, so the
    /// next commit retries.
    fn persist(&self, persisted: &mut Persisted, next: Cart) {
        if persisted.cart == next {
            debug!("Snapshot already current, skipping write");
            return;
        }

        let written = snapshot::encode(&next)
            .map_err(StorageError::from)
            .and_then(|blob| self.inner.storage.set(CART_STORAGE_KEY, &blob));

        match written {
            Ok(()) => persisted.cart = next,
            Err(err) => warn!(error = %err, "Failed to persist cart snapshot"),
        }
    }

    /// Converts a failed result into a notification.
    fn finish(&self, op: Operation, result: CoreResult<CartOutcome>) -> CartOutcome {
        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(operation = %op, error = %err, "Cart operation rejected");
                self.inner.notifier.notify_error(message_for(op, &err));
                CartOutcome::Rejected(err)
            }
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

fn load_snapshot(storage: &dyn BlobStore) -> Cart {
    match storage.get(CART_STORAGE_KEY) {
        Ok(Some(blob)) => match snapshot::decode(&blob) {
            Ok(cart) => {
                info!(items = cart.len(), "Restored cart snapshot");
                cart
            }
            Err(err) => {
                warn!(error = %err, "Discarding unreadable cart snapshot");
                Cart::new()
            }
        },
        Ok(None) => {
            debug!("No cart snapshot, starting empty");
            Cart::new()
        }
        Err(err) => {
            warn!(error = %err, "Failed to read cart snapshot, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
