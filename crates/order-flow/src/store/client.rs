//! Cloneable async client for the store actor.
//!
//! Holds only a sender, so cloning is inexpensive; every method forwards a
//! request over the mailbox and awaits its oneshot reply.

use super::message::StoreRequest;
use crate::error::{ActorError, StoreError};
use crate::model::{Order, OrderCreate, OrderId, UserId};
use tokio::sync::{mpsc, oneshot};

#[derive(Clone)]
pub struct OrderStoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl OrderStoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// Persists a brand-new pending order and returns it.
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)?
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Option<Order>, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)
    }

    pub async fn user_orders(&self, user_id: UserId) -> Result<Vec<Order>, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::UserOrders {
                user_id,
                respond_to,
            })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)
    }

    /// The user's most recent order, if any.
    pub async fn last_user_order(&self, user_id: UserId) -> Result<Option<Order>, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::LastUserOrder {
                user_id,
                respond_to,
            })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)
    }

    /// Marks an order completed; `Ok(false)` when the id is unknown.
    pub async fn complete_order(&self, id: OrderId) -> Result<bool, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Complete { id, respond_to })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)?
    }

    /// The id the next successful create will assign.
    pub async fn next_order_id(&self) -> Result<OrderId, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::NextOrderId { respond_to })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)
    }
}
