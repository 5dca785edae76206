//! # Conversation State Machine
//!
//! Per-user sessions walking the fixed step order
//! `Idle → ChoosingCategory → ChoosingItem → ChoosingQuantity →
//! DecidingExtras → ChoosingPickupTime → AwaitingContact → Confirming`
//! with the back edges and free-text fallbacks of the flow:
//!
//! - quantity via shortcut buttons or validated free text (1..=20),
//! - pickup via configured offsets or free text mentioning minutes,
//! - a contact step that always advances (declined share records a
//!   placeholder phone),
//! - an add-more loop that preserves the accumulated lines,
//! - a repeat-last-order shortcut that bypasses the whole flow.
//!
//! The [`SessionActor`] owns all sessions; the transport talks to it through
//! [`SessionClient`] with [`UserEvent`] in and [`Reply`] out.

mod actor;
mod client;
mod message;
mod prompts;
mod state;

pub use actor::{SessionActor, SessionContext};
pub use client::SessionClient;
pub use message::{Button, Reply, SessionRequest, UserEvent};
pub use state::{
    parse_pickup_time, parse_quantity, Draft, PickedItem, Session, Step, QUANTITY_MAX,
    QUANTITY_MIN,
};

use serde::{Deserialize, Serialize};

/// Knobs of the conversation flow, injected from the outer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub welcome_message: String,
    pub contact_request_message: String,
    /// Pickup offsets offered as buttons, in minutes.
    pub pickup_choices: Vec<u32>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            welcome_message: "Welcome to our Coffee Shop! 🍵\n\nI can help you place \
                              a take-away order. Just follow the simple steps."
                .to_string(),
            contact_request_message: "Please share your contact information so we can \
                                      reach you if needed.\n\nTap the button below to \
                                      share your contact."
                .to_string(),
            pickup_choices: vec![10, 20, 30],
        }
    }
}

/// Creates the session actor and its client.
pub fn new(buffer_size: usize) -> (SessionActor, SessionClient) {
    SessionActor::new(buffer_size)
}
