//! Prompt rendering for every conversation step.
//!
//! Pure functions from state to [`Reply`]; the actor calls these and never
//! assembles text inline. Keeping them together also gives the
//! out-of-sequence fallback a single place to re-render whatever step a
//! session is currently in.

use super::message::{Button, Reply, UserEvent};
use super::state::{Session, Step, QUANTITY_MAX, QUANTITY_MIN};
use super::FlowConfig;
use crate::checkout;
use crate::menu::{format_price, Menu, MenuCategory};

pub fn categories(menu: &Menu, config: &FlowConfig, offer_repeat: bool) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = menu
        .categories()
        .iter()
        .map(|c| {
            vec![Button::new(
                c.name.clone(),
                UserEvent::CategoryChosen(c.key.clone()),
            )]
        })
        .collect();
    if offer_repeat {
        keyboard.push(vec![Button::new(
            "🔄 Repeat Last Order",
            UserEvent::RepeatLastOrder,
        )]);
    }
    Reply::with_keyboard(
        format!("{}\n\nWhat would you like to order?", config.welcome_message),
        keyboard,
    )
}

pub fn items(category: &MenuCategory) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = category
        .items
        .iter()
        .map(|item| {
            vec![Button::new(
                format!("{} - {}", item.name, format_price(item.price)),
                UserEvent::ItemChosen(item.key.clone()),
            )]
        })
        .collect();
    keyboard.push(vec![Button::new(
        "🔙 Back to Categories",
        UserEvent::BackToCategories,
    )]);
    Reply::with_keyboard(
        format!("{}\n\nPlease select an item:", category.name),
        keyboard,
    )
}

pub fn quantity(item_name: &str) -> Reply {
    let keyboard: Vec<Vec<Button>> = vec![
        (1..=3)
            .map(|q| Button::new(q.to_string(), UserEvent::QuantityChosen(q)))
            .collect(),
        vec![Button::new(
            "Enter manually",
            UserEvent::EnterQuantityManually,
        )],
        vec![Button::new("🔙 Back to Items", UserEvent::BackToItems)],
    ];
    Reply::with_keyboard(
        format!("{item_name}\n\nHow many would you like?"),
        keyboard,
    )
}

pub fn manual_quantity() -> Reply {
    Reply::text("Please enter the quantity:")
}

pub fn quantity_retry() -> Reply {
    Reply::text(format!(
        "Please enter a whole number between {QUANTITY_MIN} and {QUANTITY_MAX}."
    ))
}

pub fn extras(added: Option<(u32, &str)>) -> Reply {
    let text = match added {
        Some((quantity, name)) => format!(
            "Added {quantity}x {name} to your order.\n\nWould you like to add more items?"
        ),
        None => "Would you like to add more items?".to_string(),
    };
    Reply::with_keyboard(
        text,
        vec![
            vec![Button::new("Add more items", UserEvent::AddMoreItems)],
            vec![Button::new(
                "Proceed to checkout",
                UserEvent::ProceedToCheckout,
            )],
        ],
    )
}

pub fn pickup(config: &FlowConfig) -> Reply {
    let mut keyboard: Vec<Vec<Button>> = config
        .pickup_choices
        .iter()
        .map(|&minutes| {
            vec![Button::new(
                format!("In {minutes} minutes"),
                UserEvent::PickupChosen(minutes),
            )]
        })
        .collect();
    keyboard.push(vec![Button::new(
        "Enter time manually",
        UserEvent::EnterPickupManually,
    )]);
    Reply::with_keyboard("When would you like to pick up your order?", keyboard)
}

pub fn manual_pickup() -> Reply {
    Reply::text("Please enter pickup time (e.g., '15 minutes', 'in 30 minutes'):")
}

pub fn contact(config: &FlowConfig) -> Reply {
    Reply::contact_request(config.contact_request_message.clone())
}

pub fn confirm(session: &Session) -> Reply {
    Reply::with_keyboard(
        checkout::render_draft_summary(&session.draft),
        vec![
            vec![Button::new("✅ Confirm Order", UserEvent::ConfirmOrder)],
            vec![Button::new("❌ Cancel", UserEvent::CancelOrder)],
        ],
    )
}

pub fn confirm_retry(session: &Session) -> Reply {
    let mut reply = confirm(session);
    reply.text = format!(
        "⚠️ We could not save your order. Please try again.\n\n{}",
        reply.text
    );
    reply
}

pub fn order_failed() -> Reply {
    Reply::text("⚠️ We could not save your order. Please try again.")
}

pub fn cancelled() -> Reply {
    Reply::text("Order cancelled. You can start a new order anytime with /start")
}

pub fn no_previous_order() -> Reply {
    Reply::text("No previous order found. Please start a new order with /start")
}

pub fn start_over() -> Reply {
    Reply::text("Something went wrong with your order. Please send /start to begin a new one.")
}

pub fn fallback() -> Reply {
    Reply::text("Please use the buttons provided or type /start to begin a new order.")
}

pub fn help() -> Reply {
    Reply::text(
        "☕ Coffee Shop Bot Help\n\n\
         Commands:\n\
         • /start - Start ordering\n\
         • /help - Show this help\n\
         • /menu - View menu categories\n\
         • /repeat - Repeat your last order\n\n\
         How to order:\n\
         1. Choose a category (Coffee, Desserts, Food, Drinks)\n\
         2. Select your item\n\
         3. Choose quantity\n\
         4. Add more items or proceed\n\
         5. Select pickup time\n\
         6. Share your contact\n\
         7. Confirm your order\n\n\
         That's it! Your order will be sent to our staff.",
    )
}

/// Re-renders the prompt for whatever step the session is in. Used when an
/// event arrives out of sequence, e.g. a stale button press.
pub fn current_step(session: &Session, menu: &Menu, config: &FlowConfig) -> Reply {
    match &session.step {
        Step::Idle => fallback(),
        Step::ChoosingCategory => categories(menu, config, session.last_order.is_some()),
        Step::ChoosingItem { category } => match menu.category(category) {
            Some(category) => items(category),
            None => categories(menu, config, session.last_order.is_some()),
        },
        Step::ChoosingQuantity { item, .. } => quantity(&item.name),
        Step::DecidingExtras => extras(None),
        Step::ChoosingPickupTime => pickup(config),
        Step::AwaitingContact => contact(config),
        Step::Confirming => confirm(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prompt_offers_repeat_only_with_history() {
        let menu = Menu::default();
        let config = FlowConfig::default();

        let without = categories(&menu, &config, false);
        assert_eq!(without.keyboard.len(), menu.categories().len());

        let with = categories(&menu, &config, true);
        assert_eq!(with.keyboard.len(), menu.categories().len() + 1);
        assert!(with
            .buttons()
            .any(|b| b.event == UserEvent::RepeatLastOrder));
    }

    #[test]
    fn item_buttons_show_name_and_price() {
        let menu = Menu::default();
        let reply = items(menu.category("coffee").unwrap());
        assert!(reply
            .buttons()
            .any(|b| b.label == "Espresso - $2.50"));
        assert!(reply
            .buttons()
            .any(|b| b.event == UserEvent::BackToCategories));
    }

    #[test]
    fn pickup_prompt_renders_configured_offsets() {
        let config = FlowConfig::default();
        let reply = pickup(&config);
        assert!(reply.buttons().any(|b| b.label == "In 10 minutes"));
        assert!(reply
            .buttons()
            .any(|b| b.event == UserEvent::PickupChosen(30)));
    }
}
