//! Console chat boundary.
//!
//! A stand-in for a real chat network: it renders [`Reply`]s as text with
//! numbered buttons, maps input lines back to [`UserEvent`]s, and delivers
//! staff tickets to stdout/log. The session machine cannot tell the
//! difference — it sees the same events a network transport would produce.

use async_trait::async_trait;
use order_flow::checkout::StaffNotifier;
use order_flow::error::NotifyError;
use order_flow::model::UserId;
use order_flow::session::{Button, Reply, UserEvent};
use tracing::info;

/// Staff notifier that prints the ticket tagged with the configured chat id.
pub struct LogStaffNotifier {
    staff_chat_id: String,
}

impl LogStaffNotifier {
    pub fn new(staff_chat_id: impl Into<String>) -> Self {
        Self {
            staff_chat_id: staff_chat_id.into(),
        }
    }
}

#[async_trait]
impl StaffNotifier for LogStaffNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        info!(staff_chat = %self.staff_chat_id, "Dispatching staff notification");
        println!("\n─── staff channel {} ───", self.staff_chat_id);
        println!("{text}───────────────────────\n");
        Ok(())
    }
}

/// One user's console conversation: renders replies and maps input lines
/// back to events.
pub struct ConsoleChat {
    user_id: UserId,
    user_name: String,
    buttons: Vec<Button>,
    awaiting_contact: bool,
}

impl ConsoleChat {
    pub fn new(user_id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            buttons: Vec::new(),
            awaiting_contact: false,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Prints a reply and remembers its choices for the next input line.
    pub fn render(&mut self, reply: &Reply) {
        println!("\n{}", reply.text);
        self.buttons = reply.buttons().cloned().collect();
        self.awaiting_contact = reply.request_contact;
        for (index, button) in self.buttons.iter().enumerate() {
            println!("  [{}] {}", index + 1, button.label);
        }
        if reply.request_contact {
            println!("  (enter a phone number, or 'skip' to continue without one)");
        }
    }

    /// Maps one trimmed input line to an event; `None` ends the session.
    pub fn map_input(&self, line: &str) -> Option<UserEvent> {
        match line {
            "/quit" | "/exit" => return None,
            "/start" | "/menu" => return Some(UserEvent::Start),
            "/help" => return Some(UserEvent::Help),
            "/repeat" => return Some(UserEvent::RepeatLastOrder),
            _ => {}
        }

        if self.awaiting_contact {
            let phone = (!line.eq_ignore_ascii_case("skip")).then(|| line.to_string());
            return Some(UserEvent::Contact {
                phone,
                name: self.user_name.clone(),
            });
        }

        // A bare number picks the matching button when one is on screen;
        // anything else flows through as free text (manual quantity, manual
        // pickup time).
        if let Ok(index) = line.parse::<usize>() {
            if let Some(button) = index.checked_sub(1).and_then(|i| self.buttons.get(i)) {
                return Some(button.event.clone());
            }
        }
        Some(UserEvent::Text(line.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_with(reply: &Reply) -> ConsoleChat {
        let mut chat = ConsoleChat::new(UserId(1), "Alice");
        chat.render(reply);
        chat
    }

    #[test]
    fn commands_map_regardless_of_screen_state() {
        let chat = ConsoleChat::new(UserId(1), "Alice");
        assert_eq!(chat.map_input("/start"), Some(UserEvent::Start));
        assert_eq!(chat.map_input("/menu"), Some(UserEvent::Start));
        assert_eq!(chat.map_input("/repeat"), Some(UserEvent::RepeatLastOrder));
        assert_eq!(chat.map_input("/quit"), None);
    }

    #[test]
    fn numbers_pick_buttons_and_fall_back_to_text() {
        let reply = Reply::with_keyboard(
            "pick",
            vec![vec![
                Button::new("A", UserEvent::CategoryChosen("coffee".into())),
                Button::new("B", UserEvent::BackToCategories),
            ]],
        );
        let chat = chat_with(&reply);
        assert_eq!(
            chat.map_input("1"),
            Some(UserEvent::CategoryChosen("coffee".into()))
        );
        assert_eq!(chat.map_input("2"), Some(UserEvent::BackToCategories));
        // Out of range: free text, e.g. a manual quantity.
        assert_eq!(chat.map_input("7"), Some(UserEvent::Text("7".into())));
    }

    #[test]
    fn contact_step_shares_or_skips() {
        let chat = chat_with(&Reply::contact_request("share?"));
        assert_eq!(
            chat.map_input("+100200300"),
            Some(UserEvent::Contact {
                phone: Some("+100200300".into()),
                name: "Alice".into()
            })
        );
        assert_eq!(
            chat.map_input("skip"),
            Some(UserEvent::Contact {
                phone: None,
                name: "Alice".into()
            })
        );
    }
}
