//! # Order Store
//!
//! The durable collection of confirmed orders plus id allocation:
//!
//! - [`OrderLedger`] — synchronous load/persist/allocate logic. Orders are
//!   kept as a JSON object keyed by formatted order id; the sequence
//!   counter is recomputed from the persisted records at open, so restarts
//!   continue at `max + 1`.
//! - [`StoreActor`] — single writer that owns the ledger; all mutations
//!   serialize through its mailbox.
//! - [`OrderStoreClient`] — cloneable async handle used by the session
//!   machine and checkout.

mod actor;
mod client;
mod ledger;
mod message;

pub use actor::StoreActor;
pub use client::OrderStoreClient;
pub use ledger::OrderLedger;
pub use message::{StoreRequest, StoreResponse};

use std::path::PathBuf;

/// Opens the ledger and creates the store actor plus its client.
pub fn new(
    path: impl Into<PathBuf>,
    prefix: impl Into<String>,
    counter_start: u64,
) -> (StoreActor, OrderStoreClient) {
    let ledger = OrderLedger::open(path, prefix, counter_start);
    StoreActor::new(ledger, 32)
}
