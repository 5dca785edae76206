//! Order assembly and notification text rendering.
//!
//! `place_order` is the only path from a draft to a persisted order. The
//! durable write happens first; the two outbound texts are rendered only
//! from the order the store actually committed, so a persistence failure
//! can never produce success messaging.
//!
//! Rendering is typed functions over [`Order`]/[`Draft`] rather than
//! template strings with named holes: a missing field is a compile error,
//! not a runtime format error.

use crate::error::{NotifyError, StoreError};
use crate::menu::format_price;
use crate::model::{LineItem, Order, OrderCreate};
use crate::session::Draft;
use crate::store::OrderStoreClient;
use async_trait::async_trait;

/// Outbound delivery of staff notifications, implemented by the transport.
///
/// Callers treat a returned error as non-fatal: the order is already
/// durable when dispatch runs, and a failed delivery never rolls it back.
#[async_trait]
pub trait StaffNotifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// A successfully persisted order plus the two texts rendered from it.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub customer_text: String,
    pub staff_text: String,
}

/// Sum of `price × quantity` over all lines. No tax or discount logic.
pub fn order_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::subtotal).sum()
}

/// Persists the payload as a brand-new order and renders both notification
/// texts. On a failed write the error propagates and nothing is rendered.
pub async fn place_order(
    store: &OrderStoreClient,
    params: OrderCreate,
) -> Result<PlacedOrder, StoreError> {
    let order = store.create_order(params).await?;
    let customer_text = render_customer_confirmation(&order);
    let staff_text = render_staff_ticket(&order);
    Ok(PlacedOrder {
        order,
        customer_text,
        staff_text,
    })
}

fn render_item_lines(items: &[LineItem]) -> String {
    let mut text = String::new();
    for item in items {
        text.push_str(&format!(
            "• {} x{} - {}\n",
            item.name,
            item.quantity,
            format_price(item.subtotal())
        ));
    }
    text
}

/// Customer-facing confirmation: pickup time and order number.
pub fn render_customer_confirmation(order: &Order) -> String {
    format!(
        "✅ Your order is accepted!\n\nThe barista is preparing it.\n\
         Pickup time: {}\nOrder number: {}\n\nThank you for choosing us! ☕",
        order.pickup_time, order.order_id
    )
}

/// Staff-facing ticket: who ordered what, for when, and the total.
pub fn render_staff_ticket(order: &Order) -> String {
    let mut items = render_item_lines(&order.items);
    items.push_str(&format!("\n💰 Total: {}", format_price(order.total())));
    format!(
        "🆕 NEW ORDER #{}\n\n👤 Customer: {}\n📞 Phone: {}\n\n📋 Items:\n{}\n\n\
         🕐 Pickup time: {}\n💬 User ID: {}\n",
        order.order_id, order.user_name, order.phone_number, items, order.pickup_time,
        order.user_id
    )
}

/// Pre-confirmation summary rendered from the draft.
pub fn render_draft_summary(draft: &Draft) -> String {
    let mut text = String::from("📋 ORDER SUMMARY\n\n");
    text.push_str(&render_item_lines(&draft.lines));
    text.push_str(&format!(
        "\n💰 Total: {}\n",
        format_price(order_total(&draft.lines))
    ));
    if let Some(pickup_time) = &draft.pickup_time {
        text.push_str(&format!("🕐 Pickup time: {pickup_time}\n"));
    }
    if let Some(name) = &draft.customer_name {
        text.push_str(&format!("👤 Customer: {name}\n"));
    }
    if let Some(phone) = &draft.phone_number {
        text.push_str(&format!("📞 Phone: {phone}\n"));
    }
    text.push_str("\nPlease confirm your order:");
    text
}
