//! # Store Actor
//!
//! Owns the [`OrderLedger`] and processes [`StoreRequest`]s sequentially in
//! its own task. Exclusive ownership of the ledger within one task means no
//! lock around the read-modify-persist cycle: id allocation and the durable
//! write happen atomically relative to every other request.

use super::client::OrderStoreClient;
use super::ledger::OrderLedger;
use super::message::StoreRequest;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    ledger: OrderLedger,
}

impl StoreActor {
    /// Creates the actor (server side) and its cloneable client.
    pub fn new(ledger: OrderLedger, buffer_size: usize) -> (Self, OrderStoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, ledger }, OrderStoreClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(orders = self.ledger.len(), "Order store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(user_id = %params.user_id, items = params.items.len(), "Create");
                    let result = self.ledger.create_order(params);
                    match &result {
                        Ok(order) => {
                            info!(order_id = %order.order_id, size = self.ledger.len(), "Order created")
                        }
                        Err(e) => warn!(error = %e, "Order creation failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Get { id, respond_to } => {
                    let order = self.ledger.get(&id).cloned();
                    debug!(order_id = %id, found = order.is_some(), "Get");
                    let _ = respond_to.send(order);
                }
                StoreRequest::UserOrders {
                    user_id,
                    respond_to,
                } => {
                    let orders = self.ledger.user_orders(user_id);
                    debug!(%user_id, count = orders.len(), "UserOrders");
                    let _ = respond_to.send(orders);
                }
                StoreRequest::LastUserOrder {
                    user_id,
                    respond_to,
                } => {
                    let order = self.ledger.last_user_order(user_id);
                    debug!(%user_id, found = order.is_some(), "LastUserOrder");
                    let _ = respond_to.send(order);
                }
                StoreRequest::Complete { id, respond_to } => {
                    let result = self.ledger.complete_order(&id);
                    match &result {
                        Ok(true) => info!(order_id = %id, "Order completed"),
                        Ok(false) => warn!(order_id = %id, "Not found"),
                        Err(e) => warn!(order_id = %id, error = %e, "Completion failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::NextOrderId { respond_to } => {
                    let _ = respond_to.send(self.ledger.next_order_id());
                }
            }
        }

        info!(orders = self.ledger.len(), "Order store shutdown");
    }
}
