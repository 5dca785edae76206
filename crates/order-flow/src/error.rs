//! # Error Taxonomy
//!
//! Errors are split by how they are recovered, not by where they occur:
//!
//! - [`QuantityError`] / [`PickupTimeError`] — rejected user input. The
//!   session machine re-prompts the same step; the draft never changes.
//! - [`StoreError::NotFound`] — unknown order id, surfaced to callers that
//!   asked for a specific record.
//! - [`StoreError::Persistence`] — the durable write failed. Fatal to the
//!   confirmation attempt that triggered it: the triggering mutation is
//!   rolled back and no success text is produced.
//! - [`NotifyError`] — staff delivery failed after the order was already
//!   durable. Logged, never retried automatically, never rolls back.
//! - [`ActorError`] — channel plumbing between clients and actors.

use thiserror::Error;

/// Errors in the mpsc/oneshot plumbing between a client and its actor.
#[derive(Debug, Error)]
pub enum ActorError {
    #[error("actor closed")]
    ActorClosed,
    #[error("actor dropped response channel")]
    ActorDropped,
}

/// Errors from the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested order id is not in the store.
    #[error("order not found: {0}")]
    NotFound(String),

    /// The durable write failed; the triggering mutation was rolled back.
    #[error("failed to persist order store: {0}")]
    Persistence(String),

    #[error(transparent)]
    Actor(#[from] ActorError),
}

/// Rejected quantity input. Recovered locally by re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity must be a whole number")]
    NotANumber,

    #[error("quantity must be between {min} and {max}")]
    OutOfRange { min: u32, max: u32 },
}

/// Rejected free-text pickup time input. Recovered locally by re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pickup time must mention minutes")]
pub struct PickupTimeError;

/// Staff notification delivery failure. The order stays persisted.
#[derive(Debug, Error)]
#[error("staff notification failed: {0}")]
pub struct NotifyError(pub String);
