//! # Notifications
//!
//! Rejected operations surface to the user as a single one-line message.
//!
//! ```text
//! add_product            ─┐
//! remove_product         ─┼─► CartOutcome::Rejected(err) ─► message_for(op, err) ─► Notifier
//! update_product_amount  ─┘
//! ```
//!
//! Stock-limit rejections always read "out of stock"; every other rejection
//! uses the operation's own message.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use rocket_core::CartError;
use tracing::error;

pub const ADD_FAILED: &str = "add failed";
pub const REMOVE_FAILED: &str = "remove failed";
pub const UPDATE_FAILED: &str = "update failed";
pub const OUT_OF_STOCK: &str = "out of stock";

/// User-facing error sink. Fire-and-forget: implementations must not fail.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// The cart operation a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    /// Generic failure message for this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => ADD_FAILED,
            Operation::Remove => REMOVE_FAILED,
            Operation::Update => UPDATE_FAILED,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add_product"),
            Operation::Remove => write!(f, "remove_product"),
            Operation::Update => write!(f, "update_product_amount"),
        }
    }
}

/// Picks the message shown for a rejected operation.
pub fn message_for(op: Operation, err: &CartError) -> &'static str {
    if err.is_out_of_stock() {
        OUT_OF_STOCK
    } else {
        op.failure_message()
    }
}

// =============================================================================
// Implementations
// =============================================================================

/// Writes notifications to the log at `ERROR` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        error!(target: "rocket_cart::notify", "{message}");
    }
}

/// Keeps notifications in memory until taken.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message recorded so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drains the recorded messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
