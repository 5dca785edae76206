//! Typed per-step conversation state.
//!
//! The original flow kept every user's draft in one loosely-typed map; here
//! each [`Step`] variant carries exactly the fields that are valid for that
//! step, so a selection from an earlier step cannot leak forward and a
//! handler never has to guess which keys exist.

use crate::error::{PickupTimeError, QuantityError};
use crate::model::{LineItem, Order, OrderCreate, UserId};

/// Smallest quantity accepted for a single line item.
pub const QUANTITY_MIN: u32 = 1;
/// Largest quantity accepted for a single line item.
pub const QUANTITY_MAX: u32 = 20;

/// Item picked during item selection, carried until a quantity is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedItem {
    pub key: String,
    pub name: String,
    pub price: f64,
}

/// The current step of a user's conversation, in flow order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Step {
    #[default]
    Idle,
    ChoosingCategory,
    ChoosingItem {
        category: String,
    },
    ChoosingQuantity {
        category: String,
        item: PickedItem,
    },
    DecidingExtras,
    ChoosingPickupTime,
    AwaitingContact,
    Confirming,
}

/// The in-progress, not-yet-persisted order a user is assembling.
///
/// Lines accumulate across the add-more loop; pickup time and contact
/// details are filled in by the later steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub lines: Vec<LineItem>,
    pub pickup_time: Option<String>,
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
}

impl Draft {
    /// Converts a completed draft into a create payload. `None` until every
    /// step has run (at least one line, pickup time, contact details).
    pub fn to_order_create(&self, user_id: UserId) -> Option<OrderCreate> {
        if self.lines.is_empty() {
            return None;
        }
        Some(OrderCreate {
            user_id,
            user_name: self.customer_name.clone()?,
            phone_number: self.phone_number.clone()?,
            items: self.lines.clone(),
            pickup_time: self.pickup_time.clone()?,
        })
    }
}

/// One user's conversation: current step, accumulated draft, and the
/// last persisted order (cached at `/start` for the repeat shortcut).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub step: Step,
    pub draft: Draft,
    pub last_order: Option<Order>,
}

/// Parses free-text quantity input: an integer in
/// [`QUANTITY_MIN`]`..=`[`QUANTITY_MAX`].
pub fn parse_quantity(text: &str) -> Result<u32, QuantityError> {
    let quantity: u32 = text.trim().parse().map_err(|_| QuantityError::NotANumber)?;
    if (QUANTITY_MIN..=QUANTITY_MAX).contains(&quantity) {
        Ok(quantity)
    } else {
        Err(QuantityError::OutOfRange {
            min: QUANTITY_MIN,
            max: QUANTITY_MAX,
        })
    }
}

/// Accepts free-text pickup input when it mentions minutes ("min" covers
/// "minutes"); the accepted text is stored verbatim.
pub fn parse_pickup_time(text: &str) -> Result<String, PickupTimeError> {
    if text.to_lowercase().contains("min") {
        Ok(text.to_string())
    } else {
        Err(PickupTimeError)
    }
}
