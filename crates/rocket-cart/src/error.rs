//! # Cart Store Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Inventory     │  │    Storage      │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  Io             │  │  ConfigLoadFailed       │ │
//! │  │  Status         │  │  Snapshot       │  │  InvalidUrl             │ │
//! │  │  Transport      │  │                 │  │  InvalidConfig          │ │
//! │  │  Decode         │  │                 │  │  NoDataDir              │ │
//! │  └────────┬────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │           │                                                             │
//! │           ▼                                                             │
//! │      CartError (rocket-core) ──► notification                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rocket_core::{CartError, ProductId, SnapshotError};
use thiserror::Error;

// =============================================================================
// Inventory Errors
// =============================================================================

/// Failures talking to the inventory endpoint.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The endpoint answered 404 for this resource.
    #[error("{resource}/{id} not found")]
    NotFound { resource: &'static str, id: ProductId },

    /// The endpoint answered with a non-success status.
    #[error("{resource}/{id} returned HTTP {status}")]
    Status {
        resource: &'static str,
        id: ProductId,
        status: u16,
    },

    /// The request never completed (DNS, connect, timeout, ...).
    #[error("Inventory transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected record.
    #[error("Invalid inventory response: {0}")]
    Decode(String),

    /// The request URL could not be built.
    #[error("Invalid inventory URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<InventoryError> for CartError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound { id, .. } => CartError::NotFound { id },
            other => CartError::TransportFailure(other.to_string()),
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Failures reading or writing the snapshot store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Failures loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Invalid inventory URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not determine a data directory; set ROCKET_DATA_DIR")]
    NoDataDir,
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ConfigLoadFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_cart_not_found() {
        let err: CartError = InventoryError::NotFound {
            resource: "stock",
            id: ProductId::new(4),
        }
        .into();
        assert_eq!(err, CartError::NotFound { id: ProductId::new(4) });
    }

    #[test]
    fn test_other_failures_map_to_transport() {
        let err: CartError = InventoryError::Status {
            resource: "products",
            id: ProductId::new(4),
            status: 503,
        }
        .into();
        assert_eq!(
            err,
            CartError::TransportFailure("products/4 returned HTTP 503".to_string())
        );
    }
}
