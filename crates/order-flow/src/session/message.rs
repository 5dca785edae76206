//! Transport-agnostic messages between the chat boundary and the machine.
//!
//! The transport turns deliveries (commands, button presses, text, shared
//! contacts) into [`UserEvent`]s and renders [`Reply`]s however its medium
//! allows. Buttons carry the event they stand for, so no string protocol
//! exists between the two sides and a missing mapping is a compile error.

use crate::model::UserId;
use tokio::sync::oneshot;

/// An incoming user action.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// `/start` or `/menu`: begin a fresh order.
    Start,
    /// `/help`: show the command summary.
    Help,
    /// `/repeat` or the repeat shortcut button.
    RepeatLastOrder,
    CategoryChosen(String),
    BackToCategories,
    ItemChosen(String),
    BackToItems,
    /// A quantity shortcut button.
    QuantityChosen(u32),
    EnterQuantityManually,
    AddMoreItems,
    ProceedToCheckout,
    /// A pickup offset button, in minutes.
    PickupChosen(u32),
    EnterPickupManually,
    /// Contact step outcome; `phone` is `None` when the user declined to
    /// share, `name` always comes from the user's profile.
    Contact {
        phone: Option<String>,
        name: String,
    },
    ConfirmOrder,
    CancelOrder,
    /// Free text outside any command.
    Text(String),
}

/// One tappable choice in a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub event: UserEvent,
}

impl Button {
    pub fn new(label: impl Into<String>, event: UserEvent) -> Self {
        Self {
            label: label.into(),
            event,
        }
    }
}

/// Outbound prompt: text, rows of buttons, and whether the transport should
/// offer its contact-sharing control.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reply {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
    pub request_contact: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            keyboard,
            request_contact: false,
        }
    }

    pub fn contact_request(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
            request_contact: true,
        }
    }

    /// All buttons, row by row, for transports that render a flat list.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.keyboard.iter().flatten()
    }
}

/// Request processed by the session actor.
#[derive(Debug)]
pub enum SessionRequest {
    Handle {
        user_id: UserId,
        event: UserEvent,
        respond_to: oneshot::Sender<Reply>,
    },
}
