//! Domain types shared by the store, the session machine, and checkout.
//!
//! The serde layout of [`Order`] is the persisted wire format: field names
//! are stable (`order_id`, `user_id`, `user_name`, `phone_number`, `items`,
//! `pickup_time`, `status`, `created_at`, `completed_at`) and timestamps
//! serialize as ISO-8601.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Phone value recorded when the user declines to share a contact.
pub const PHONE_NOT_PROVIDED: &str = "Not provided";

/// Chat-level user identifier, issued by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Formatted order identifier, e.g. `COFFEE_1000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    /// The numeric sequence embedded in the id, if it parses.
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit('_').next()?.parse().ok()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One item+quantity entry within a draft or persisted order.
///
/// Immutable once appended: re-selecting the same menu item appends a new
/// line rather than merging quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

/// A durable, confirmed order record. Created atomically by checkout,
/// owned by the store afterwards, mutated only by completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    pub phone_number: String,
    pub items: Vec<LineItem>,
    pub pickup_time: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Sum of line subtotals. No tax or discount logic.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub user_name: String,
    pub phone_number: String,
    pub items: Vec<LineItem>,
    pub pickup_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_sequence_parses_the_trailing_number() {
        assert_eq!(OrderId("COFFEE_1000".into()).sequence(), Some(1000));
        assert_eq!(OrderId("COFFEE_0042".into()).sequence(), Some(42));
        assert_eq!(OrderId("garbage".into()).sequence(), None);
    }

    #[test]
    fn line_subtotal_multiplies_price_by_quantity() {
        let line = LineItem {
            name: "Espresso".into(),
            price: 2.5,
            quantity: 2,
        };
        assert_eq!(line.subtotal(), 5.0);
    }

    #[test]
    fn order_serde_uses_stable_field_names() {
        let order = Order {
            order_id: OrderId("COFFEE_1000".into()),
            user_id: UserId(7),
            user_name: "Alice".into(),
            phone_number: PHONE_NOT_PROVIDED.into(),
            items: vec![LineItem {
                name: "Espresso".into(),
                price: 2.5,
                quantity: 2,
            }],
            pickup_time: "In 10 minutes".into(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_id"], "COFFEE_1000");
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert!(json["completed_at"].is_null());

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
