//! End-to-end tests of the conversation state machine: real session and
//! store actors, a temp-file ledger, and a recording staff notifier.

use async_trait::async_trait;
use order_flow::checkout::StaffNotifier;
use order_flow::error::NotifyError;
use order_flow::menu::Menu;
use order_flow::model::{OrderStatus, UserId};
use order_flow::session::{self, FlowConfig, Reply, SessionClient, SessionContext, UserEvent};
use order_flow::store::{self, OrderStoreClient};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl StaffNotifier for RecordingNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// A staff channel that is always down.
struct FailingNotifier;

#[async_trait]
impl StaffNotifier for FailingNotifier {
    async fn notify(&self, _text: &str) -> Result<(), NotifyError> {
        Err(NotifyError("channel unreachable".into()))
    }
}

struct TestBot {
    session: SessionClient,
    store: OrderStoreClient,
    staff: Arc<RecordingNotifier>,
    _dir: tempfile::TempDir,
}

fn start_bot() -> TestBot {
    let dir = tempfile::tempdir().unwrap();
    let staff = Arc::new(RecordingNotifier::default());
    let (session, store) = start_actors(dir.path().join("orders.json"), staff.clone());
    TestBot {
        session,
        store,
        staff,
        _dir: dir,
    }
}

fn start_actors(
    storage: impl AsRef<Path>,
    notifier: Arc<dyn StaffNotifier>,
) -> (SessionClient, OrderStoreClient) {
    let (store_actor, store_client) = store::new(storage.as_ref(), "COFFEE", 1000);
    tokio::spawn(store_actor.run());

    let (session_actor, session_client) = session::new(32);
    tokio::spawn(session_actor.run(SessionContext {
        menu: Arc::new(Menu::default()),
        store: store_client.clone(),
        notifier,
        config: Arc::new(FlowConfig::default()),
    }));

    (session_client, store_client)
}

async fn drive(session: &SessionClient, user: UserId, events: Vec<UserEvent>) -> Reply {
    let mut last = Reply::default();
    for event in events {
        last = session.handle(user, event).await.unwrap();
    }
    last
}

fn espresso_flow() -> Vec<UserEvent> {
    vec![
        UserEvent::Start,
        UserEvent::CategoryChosen("coffee".into()),
        UserEvent::ItemChosen("espresso".into()),
        UserEvent::QuantityChosen(2),
        UserEvent::ProceedToCheckout,
        UserEvent::PickupChosen(10),
        UserEvent::Contact {
            phone: None,
            name: "Alice".into(),
        },
        UserEvent::ConfirmOrder,
    ]
}

#[tokio::test]
async fn espresso_scenario_creates_the_expected_order() {
    let bot = start_bot();
    let user = UserId(1);

    let confirmation = drive(&bot.session, user, espresso_flow()).await;
    assert!(confirmation.text.contains("Order number: COFFEE_1000"));
    assert!(confirmation.text.contains("Pickup time: In 10 minutes"));

    let orders = bot.store.user_orders(user).await.unwrap();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].name, "Espresso");
    assert_eq!(order.items[0].price, 2.5);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.total(), 5.0);
    assert_eq!(order.phone_number, "Not provided");
    assert_eq!(order.user_name, "Alice");
    assert_eq!(order.status, OrderStatus::Pending);

    let staff = bot.staff.sent();
    assert_eq!(staff.len(), 1);
    assert!(staff[0].contains("• Espresso x2 - $5.00"));
    assert!(staff[0].contains("Total: $5.00"));
    assert!(staff[0].contains("Phone: Not provided"));
    assert!(staff[0].contains("User ID: 1"));
}

#[tokio::test]
async fn lines_accumulate_in_selection_order() {
    let bot = start_bot();
    let user = UserId(7);

    let events = vec![
        UserEvent::Start,
        UserEvent::CategoryChosen("coffee".into()),
        UserEvent::ItemChosen("espresso".into()),
        UserEvent::QuantityChosen(1),
        UserEvent::AddMoreItems,
        UserEvent::CategoryChosen("desserts".into()),
        UserEvent::ItemChosen("muffin".into()),
        UserEvent::QuantityChosen(2),
        UserEvent::AddMoreItems,
        UserEvent::CategoryChosen("drinks".into()),
        UserEvent::ItemChosen("tea".into()),
        UserEvent::QuantityChosen(3),
        UserEvent::ProceedToCheckout,
        UserEvent::PickupChosen(20),
        UserEvent::Contact {
            phone: Some("+100200300".into()),
            name: "Bob".into(),
        },
        UserEvent::ConfirmOrder,
    ];
    drive(&bot.session, user, events).await;

    let orders = bot.store.user_orders(user).await.unwrap();
    assert_eq!(orders.len(), 1);
    let names: Vec<&str> = orders[0].items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Espresso", "Muffin", "Herbal Tea"]);
    let quantities: Vec<u32> = orders[0].items.iter().map(|i| i.quantity).collect();
    assert_eq!(quantities, [1, 2, 3]);
    assert_eq!(orders[0].phone_number, "+100200300");
}

#[tokio::test]
async fn invalid_quantity_text_is_rejected_without_touching_the_draft() {
    let bot = start_bot();
    let user = UserId(3);

    drive(
        &bot.session,
        user,
        vec![
            UserEvent::Start,
            UserEvent::CategoryChosen("coffee".into()),
            UserEvent::ItemChosen("espresso".into()),
            UserEvent::EnterQuantityManually,
        ],
    )
    .await;

    for bad in ["0", "21", "abc"] {
        let reply = bot
            .session
            .handle(user, UserEvent::Text(bad.into()))
            .await
            .unwrap();
        assert!(
            reply.text.contains("between 1 and 20"),
            "{bad:?} should be rejected"
        );
    }

    // A boundary value is accepted and the rejected attempts left no lines.
    let events = vec![
        UserEvent::Text("20".into()),
        UserEvent::ProceedToCheckout,
        UserEvent::PickupChosen(10),
        UserEvent::Contact {
            phone: None,
            name: "Cara".into(),
        },
        UserEvent::ConfirmOrder,
    ];
    drive(&bot.session, user, events).await;

    let orders = bot.store.user_orders(user).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items.len(), 1);
    assert_eq!(orders[0].items[0].quantity, 20);
}

#[tokio::test]
async fn manual_pickup_text_is_stored_verbatim_or_rejected() {
    let bot = start_bot();
    let user = UserId(4);

    drive(
        &bot.session,
        user,
        vec![
            UserEvent::Start,
            UserEvent::CategoryChosen("coffee".into()),
            UserEvent::ItemChosen("latte".into()),
            UserEvent::QuantityChosen(1),
            UserEvent::ProceedToCheckout,
            UserEvent::EnterPickupManually,
        ],
    )
    .await;

    // No time-unit keyword: rejected, state does not advance.
    let rejected = bot
        .session
        .handle(user, UserEvent::Text("tomorrow".into()))
        .await
        .unwrap();
    assert!(rejected.text.contains("use the buttons"));

    let events = vec![
        UserEvent::Text("in about 45 minutes".into()),
        UserEvent::Contact {
            phone: None,
            name: "Dan".into(),
        },
        UserEvent::ConfirmOrder,
    ];
    drive(&bot.session, user, events).await;

    let orders = bot.store.user_orders(user).await.unwrap();
    assert_eq!(orders[0].pickup_time, "in about 45 minutes");
}

#[tokio::test]
async fn repeat_without_history_is_an_informational_noop() {
    let bot = start_bot();
    let user = UserId(5);

    let reply = drive(&bot.session, user, vec![UserEvent::RepeatLastOrder]).await;
    assert!(reply.text.contains("No previous order found"));
    assert!(bot.store.user_orders(user).await.unwrap().is_empty());
    assert!(bot.staff.sent().is_empty());
}

#[tokio::test]
async fn repeat_recreates_the_last_order_as_a_new_one() {
    let bot = start_bot();
    let user = UserId(6);

    drive(&bot.session, user, espresso_flow()).await;

    // The fresh start now offers the shortcut.
    let start = drive(&bot.session, user, vec![UserEvent::Start]).await;
    assert!(start
        .buttons()
        .any(|b| b.event == UserEvent::RepeatLastOrder));

    let reply = drive(&bot.session, user, vec![UserEvent::RepeatLastOrder]).await;
    assert!(reply.text.contains("Order number: COFFEE_1001"));

    let orders = bot.store.user_orders(user).await.unwrap();
    assert_eq!(orders.len(), 2);
    let mut items: Vec<_> = orders.iter().map(|o| o.items.clone()).collect();
    items.dedup();
    assert_eq!(items.len(), 1, "repeat must copy the items");
    assert_eq!(bot.staff.sent().len(), 2);
}

#[tokio::test]
async fn cancel_discards_the_draft() {
    let bot = start_bot();
    let user = UserId(8);

    let mut events = espresso_flow();
    events.pop();
    events.push(UserEvent::CancelOrder);
    let reply = drive(&bot.session, user, events).await;

    assert!(reply.text.contains("Order cancelled"));
    assert!(bot.store.user_orders(user).await.unwrap().is_empty());
    assert!(bot.staff.sent().is_empty());

    // A fresh start has no history to repeat.
    let start = drive(&bot.session, user, vec![UserEvent::Start]).await;
    assert!(!start
        .buttons()
        .any(|b| b.event == UserEvent::RepeatLastOrder));
}

#[tokio::test]
async fn out_of_sequence_events_recover_without_panicking() {
    let bot = start_bot();
    let user = UserId(9);

    // Confirming with no conversation at all.
    let reply = drive(&bot.session, user, vec![UserEvent::ConfirmOrder]).await;
    assert!(reply.text.contains("/start"));

    // A stale category press while awaiting the quantity re-renders the
    // quantity prompt instead of advancing.
    drive(
        &bot.session,
        user,
        vec![
            UserEvent::Start,
            UserEvent::CategoryChosen("coffee".into()),
            UserEvent::ItemChosen("mocha".into()),
        ],
    )
    .await;
    let reply = drive(
        &bot.session,
        user,
        vec![UserEvent::CategoryChosen("drinks".into())],
    )
    .await;
    assert!(reply.text.contains("How many"));

    // Unknown menu keys fall back to a safe prompt.
    let reply = drive(
        &bot.session,
        user,
        vec![UserEvent::Start, UserEvent::CategoryChosen("sushi".into())],
    )
    .await;
    assert!(reply.text.contains("What would you like to order?"));
}

#[tokio::test]
async fn persistence_failure_keeps_the_session_at_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let staff = Arc::new(RecordingNotifier::default());
    // The ledger path points into a directory that does not exist, so every
    // durable write fails.
    let (session, store) = start_actors(
        dir.path().join("missing").join("orders.json"),
        staff.clone(),
    );
    let user = UserId(10);

    let reply = drive(&session, user, espresso_flow()).await;
    assert!(reply.text.contains("could not save your order"));
    // The retry keyboard is still there.
    assert!(reply.buttons().any(|b| b.event == UserEvent::ConfirmOrder));

    // No success messaging anywhere: staff heard nothing, nothing persisted.
    assert!(staff.sent().is_empty());
    assert!(store.user_orders(user).await.unwrap().is_empty());

    // Cancelling still works after the failure.
    let reply = session.handle(user, UserEvent::CancelOrder).await.unwrap();
    assert!(reply.text.contains("Order cancelled"));
}

#[tokio::test]
async fn notifier_failure_never_rolls_back_the_order() {
    let dir = tempfile::tempdir().unwrap();
    let (session, store) = start_actors(dir.path().join("orders.json"), Arc::new(FailingNotifier));
    let user = UserId(11);

    let reply = drive(&session, user, espresso_flow()).await;
    assert!(reply.text.contains("Order number: COFFEE_1000"));
    assert_eq!(store.user_orders(user).await.unwrap().len(), 1);
}

#[tokio::test]
async fn help_leaves_the_conversation_untouched() {
    let bot = start_bot();
    let user = UserId(12);

    drive(
        &bot.session,
        user,
        vec![
            UserEvent::Start,
            UserEvent::CategoryChosen("coffee".into()),
            UserEvent::ItemChosen("espresso".into()),
        ],
    )
    .await;

    let help = drive(&bot.session, user, vec![UserEvent::Help]).await;
    assert!(help.text.contains("/repeat"));

    // The quantity step is still live.
    let reply = drive(&bot.session, user, vec![UserEvent::QuantityChosen(1)]).await;
    assert!(reply.text.contains("Added 1x Espresso"));
}
