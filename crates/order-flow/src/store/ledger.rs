//! Durable order collection with sequential id allocation.
//!
//! The ledger is fully synchronous; the store actor owns it and serializes
//! access. Every mutation persists the whole collection before it is
//! considered committed. A failed write rolls the in-memory mutation back
//! and leaves the sequence counter untouched, so a counter advance is only
//! observable when the matching record is durable.

use crate::error::StoreError;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, UserId};
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Minimum width of the zero-padded sequence in a formatted order id.
const SEQ_WIDTH: usize = 4;

pub struct OrderLedger {
    path: PathBuf,
    prefix: String,
    orders: HashMap<OrderId, Order>,
    next_seq: u64,
}

impl OrderLedger {
    /// Opens the ledger at `path`.
    ///
    /// A missing or malformed file is logged and treated as an empty store,
    /// never as a fatal condition. The sequence counter resumes at
    /// `max(existing sequence numbers) + 1`, or at `counter_start` when the
    /// store holds nothing.
    pub fn open(
        path: impl Into<PathBuf>,
        prefix: impl Into<String>,
        counter_start: u64,
    ) -> Self {
        let path = path.into();
        let orders = Self::load(&path);
        let next_seq = orders
            .keys()
            .filter_map(OrderId::sequence)
            .max()
            .map(|max| max + 1)
            .unwrap_or(counter_start);
        info!(path = %path.display(), orders = orders.len(), next_seq, "Order ledger opened");
        Self {
            path,
            prefix: prefix.into(),
            orders,
            next_seq,
        }
    }

    fn load(path: &Path) -> HashMap<OrderId, Order> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable order file, starting empty");
                return HashMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(orders) => orders,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed order file, starting empty");
                HashMap::new()
            }
        }
    }

    /// The id the next successful [`create_order`](Self::create_order) will
    /// assign. Deterministic between mutations.
    pub fn next_order_id(&self) -> OrderId {
        OrderId(format!(
            "{}_{:0width$}",
            self.prefix,
            self.next_seq,
            width = SEQ_WIDTH
        ))
    }

    /// Creates a new pending order and persists the collection before
    /// returning it.
    ///
    /// On a failed write the record is removed again and the sequence
    /// counter stays put: the order was not placed.
    pub fn create_order(&mut self, params: OrderCreate) -> Result<Order, StoreError> {
        let order_id = self.next_order_id();
        let order = Order {
            order_id: order_id.clone(),
            user_id: params.user_id,
            user_name: params.user_name,
            phone_number: params.phone_number,
            items: params.items,
            pickup_time: params.pickup_time,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        };

        self.orders.insert(order_id.clone(), order.clone());
        if let Err(e) = self.save() {
            self.orders.remove(&order_id);
            return Err(e);
        }
        self.next_seq += 1;
        Ok(order)
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    /// All orders placed by `user_id`, in storage order.
    pub fn user_orders(&self, user_id: UserId) -> Vec<Order> {
        self.orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }

    /// The user's order with the greatest creation timestamp. Ties (possible
    /// within one clock tick) resolve to the higher sequence number.
    pub fn last_user_order(&self, user_id: UserId) -> Option<Order> {
        self.orders
            .values()
            .filter(|o| o.user_id == user_id)
            .max_by_key(|o| (o.created_at, o.order_id.sequence()))
            .cloned()
    }

    /// Marks an order completed and persists. `Ok(false)` for unknown ids.
    pub fn complete_order(&mut self, id: &OrderId) -> Result<bool, StoreError> {
        let previous = match self.orders.get_mut(id) {
            Some(order) => {
                let previous = (order.status, order.completed_at);
                order.status = OrderStatus::Completed;
                order.completed_at = Some(Utc::now());
                previous
            }
            None => return Ok(false),
        };

        if let Err(e) = self.save() {
            if let Some(order) = self.orders.get_mut(id) {
                order.status = previous.0;
                order.completed_at = previous.1;
            }
            return Err(e);
        }
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.orders)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Persistence(e.to_string()))
    }
}
