//! Request messages between the store client and the store actor.

use crate::error::StoreError;
use crate::model::{Order, OrderCreate, OrderId, UserId};
use tokio::sync::oneshot;

/// One-shot reply channel carried by every store request.
pub type StoreResponse<T> = oneshot::Sender<T>;

/// Operations the store actor processes, one at a time, in arrival order.
///
/// Serializing `Create` and `Complete` through one mailbox is what keeps the
/// shared sequence counter race-free: two users confirming at the same
/// moment still get distinct ids.
#[derive(Debug)]
pub enum StoreRequest {
    Create {
        params: OrderCreate,
        respond_to: StoreResponse<Result<Order, StoreError>>,
    },
    Get {
        id: OrderId,
        respond_to: StoreResponse<Option<Order>>,
    },
    UserOrders {
        user_id: UserId,
        respond_to: StoreResponse<Vec<Order>>,
    },
    LastUserOrder {
        user_id: UserId,
        respond_to: StoreResponse<Option<Order>>,
    },
    Complete {
        id: OrderId,
        respond_to: StoreResponse<Result<bool, StoreError>>,
    },
    NextOrderId {
        respond_to: StoreResponse<OrderId>,
    },
}
