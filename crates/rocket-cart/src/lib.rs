//! # rocket-cart: Cart Store for Rocket Cart
//!
//! This crate wires the pure cart rules from `rocket-core` to the outside
//! world: the inventory endpoint, the snapshot store and the notification
//! sink.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CartStore                                      │
//! │                                                                         │
//! │  UI action ──► add_product / remove_product / update_product_amount    │
//! │                      │                                                  │
//! │                      │ (single writer: tokio Mutex)                     │
//! │                      ▼                                                  │
//! │  ┌────────────────────────┐   fetch_product / fetch_stock              │
//! │  │    InventoryClient     │ ◄──────────────────────────────            │
//! │  │  HttpInventoryClient   │                                             │
//! │  └────────────────────────┘                                             │
//! │                      │                                                  │
//! │                      ▼  commit                                          │
//! │  ┌────────────────────────┐   ┌────────────────────────┐               │
//! │  │  watch::Sender<Cart>   │   │      BlobStore         │               │
//! │  │  (subscribers render)  │   │  snapshot if changed   │               │
//! │  └────────────────────────┘   └────────────────────────┘               │
//! │                                                                         │
//! │  Rejected? ──► Notifier::notify_error (exactly one message)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`store`] - `CartStore`, the single source of truth
//! - [`inventory`] - `InventoryClient` trait and HTTP implementation
//! - [`storage`] - `BlobStore` trait, in-memory and file implementations
//! - [`notify`] - `Notifier` trait and notification messages
//! - [`config`] - Configuration loading (TOML + environment)
//! - [`error`] - Error types for this crate

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod storage;
pub mod store;

pub use config::CartConfig;
pub use error::{ConfigError, InventoryError, StorageError};
pub use inventory::{HttpInventoryClient, InventoryClient};
pub use notify::{Notifier, Operation, RecordingNotifier, TracingNotifier};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::{CartOutcome, CartStore, UpdateProductAmount};
