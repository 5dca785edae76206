//! Channel-level mock store client.
//!
//! In tests of logic *around* the store client (the session machine,
//! checkout) we often don't want a real [`StoreActor`](crate::store::StoreActor)
//! with a file behind it. `mock_store_client` hands out a client wired to a
//! receiver the test controls, so the test can inspect each request and
//! answer it deterministically, including with errors that are hard to
//! provoke through a real ledger.

use crate::error::StoreError;
use crate::model::{Order, OrderCreate, OrderId, UserId};
use crate::store::{OrderStoreClient, StoreRequest};
use tokio::sync::{mpsc, oneshot};

/// Creates a store client and the receiver its requests arrive on.
pub fn mock_store_client(
    buffer_size: usize,
) -> (OrderStoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (OrderStoreClient::new(sender), receiver)
}

/// Asserts that the next request is a `Create` and returns its parts.
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(OrderCreate, oneshot::Sender<Result<Order, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Asserts that the next request is a `Get` and returns its parts.
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(OrderId, oneshot::Sender<Option<Order>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Asserts that the next request is a `LastUserOrder` and returns its parts.
pub async fn expect_last_user_order(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(UserId, oneshot::Sender<Option<Order>>)> {
    match receiver.recv().await {
        Some(StoreRequest::LastUserOrder {
            user_id,
            respond_to,
        }) => Some((user_id, respond_to)),
        _ => None,
    }
}

/// Asserts that the next request is a `Complete` and returns its parts.
pub async fn expect_complete(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(OrderId, oneshot::Sender<Result<bool, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Complete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
