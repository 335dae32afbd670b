//! # Error Types
//!
//! Domain-specific error types for rocket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocket-core errors (this file)                                        │
//! │  ├── CartError        - Why a cart operation was rejected              │
//! │  ├── ValidationError  - Cart invariant violations                      │
//! │  └── SnapshotError    - Snapshot encode/decode failures                │
//! │                                                                         │
//! │  rocket-cart errors (separate crate)                                   │
//! │  ├── InventoryError   - Inventory endpoint failures                    │
//! │  ├── StorageError     - Blob store failures                            │
//! │  └── ConfigError      - Configuration failures                         │
//! │                                                                         │
//! │  Flow: InventoryError → CartError → user notification                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart operation leaves the cart unchanged.
///
/// None of these reach the UI as values: the store turns each one into a
/// single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Product or stock record does not exist in the catalog.
    #[error("Product not found: {id}")]
    NotFound { id: ProductId },

    /// Requested amount exceeds the available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Set quantity (10)
    ///      │
    ///      ▼
    /// GET stock/1 → { amount: 5 }
    ///      │
    ///      ▼
    /// OutOfStock { id: 1, available: 5, requested: 10 }
    ///      │
    ///      ▼
    /// UI shows: "out of stock"
    /// ```
    #[error("Insufficient stock for product {id}: available {available}, requested {requested}")]
    OutOfStock {
        id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Attempted to remove a product that is not in the cart.
    #[error("Product {id} is not in the cart")]
    ProductAbsentOnRemove { id: ProductId },

    /// The inventory endpoint could not be reached or answered badly.
    #[error("Inventory request failed: {0}")]
    TransportFailure(String),

    /// A cart invariant would have been broken.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CartError {
    /// Returns true if this rejection is a stock-limit rejection.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Cart invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Line item amount must be at least 1.
    #[error("Amount for product {id} must be positive, got {amount}")]
    NonPositiveAmount { id: ProductId, amount: i64 },

    /// The same product id appears twice.
    #[error("Product {id} appears more than once in the cart")]
    DuplicateProduct { id: ProductId },
}

// =============================================================================
// Snapshot Error
// =============================================================================

/// Errors raised while encoding or decoding a cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The blob is not a valid snapshot document.
    #[error("Malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The blob parsed but describes a cart that breaks an invariant.
    #[error("Invalid cart snapshot: {0}")]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CoreResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
