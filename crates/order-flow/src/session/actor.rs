//! # Session Actor
//!
//! Owns every user's conversation state and applies events one at a time.
//!
//! The chat transport serializes delivery per user, and the actor's mailbox
//! serializes across users, so each [`Session`] is mutated by exactly one
//! handler at a time without any locking. Dependencies (menu, store client,
//! staff notifier, flow config) are injected into [`run`](SessionActor::run),
//! not the constructor, which keeps wiring acyclic.
//!
//! Every event produces a [`Reply`]; user input never errors out of the
//! actor. Rejected input re-prompts the same step, out-of-sequence input
//! re-renders the current step, and an action that assumes a conversation
//! which does not exist falls back to a start-over message.

use super::client::SessionClient;
use super::message::{Reply, SessionRequest, UserEvent};
use super::state::{parse_pickup_time, parse_quantity, PickedItem, Session, Step};
use super::{prompts, FlowConfig};
use crate::checkout::{self, PlacedOrder, StaffNotifier};
use crate::menu::Menu;
use crate::model::{LineItem, Order, OrderCreate, UserId, PHONE_NOT_PROVIDED};
use crate::store::OrderStoreClient;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Dependencies injected into the session actor at start.
pub struct SessionContext {
    pub menu: Arc<Menu>,
    pub store: OrderStoreClient,
    pub notifier: Arc<dyn StaffNotifier>,
    pub config: Arc<FlowConfig>,
}

pub struct SessionActor {
    receiver: mpsc::Receiver<SessionRequest>,
    sessions: HashMap<UserId, Session>,
}

impl SessionActor {
    /// Creates the actor (server side) and its cloneable client.
    pub fn new(buffer_size: usize) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (
            Self {
                receiver,
                sessions: HashMap::new(),
            },
            SessionClient::new(sender),
        )
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, ctx: SessionContext) {
        info!("Session actor started");

        while let Some(SessionRequest::Handle {
            user_id,
            event,
            respond_to,
        }) = self.receiver.recv().await
        {
            debug!(%user_id, ?event, "Event");
            let reply = self.handle_event(user_id, event, &ctx).await;
            let _ = respond_to.send(reply);
        }

        info!(sessions = self.sessions.len(), "Session actor shutdown");
    }

    async fn handle_event(
        &mut self,
        user_id: UserId,
        event: UserEvent,
        ctx: &SessionContext,
    ) -> Reply {
        match event {
            UserEvent::Start => self.start(user_id, ctx).await,
            UserEvent::Help => prompts::help(),
            UserEvent::RepeatLastOrder => self.repeat_last_order(user_id, ctx).await,
            UserEvent::ConfirmOrder => self.confirm(user_id, ctx).await,
            event => self.advance(user_id, event, ctx),
        }
    }

    /// Begins a fresh conversation: any previous draft for the user is
    /// discarded and the repeat shortcut is offered when the store has an
    /// order on file.
    async fn start(&mut self, user_id: UserId, ctx: &SessionContext) -> Reply {
        let last_order = match ctx.store.last_user_order(user_id).await {
            Ok(last) => last,
            Err(e) => {
                warn!(%user_id, error = %e, "Last-order lookup failed");
                None
            }
        };
        let offer_repeat = last_order.is_some();
        self.sessions.insert(
            user_id,
            Session {
                step: Step::ChoosingCategory,
                last_order,
                ..Session::default()
            },
        );
        prompts::categories(&ctx.menu, &ctx.config, offer_repeat)
    }

    /// Applies a synchronous transition. Everything that needs the store or
    /// the notifier goes through `start`/`confirm`/`repeat_last_order`.
    fn advance(&mut self, user_id: UserId, event: UserEvent, ctx: &SessionContext) -> Reply {
        let Some(session) = self.sessions.get_mut(&user_id) else {
            // An action for a conversation that does not exist, e.g. a stale
            // button press after a restart.
            debug!(%user_id, ?event, "Event without a session");
            return prompts::start_over();
        };

        match (session.step.clone(), event) {
            (Step::ChoosingCategory, UserEvent::CategoryChosen(key)) => {
                match ctx.menu.category(&key) {
                    Some(category) => {
                        session.step = Step::ChoosingItem { category: key };
                        prompts::items(category)
                    }
                    None => {
                        warn!(%user_id, category = %key, "Unknown category");
                        prompts::categories(&ctx.menu, &ctx.config, session.last_order.is_some())
                    }
                }
            }

            (Step::ChoosingItem { .. }, UserEvent::BackToCategories) => {
                session.step = Step::ChoosingCategory;
                prompts::categories(&ctx.menu, &ctx.config, session.last_order.is_some())
            }

            (Step::ChoosingItem { category }, UserEvent::ItemChosen(item_key)) => {
                match ctx.menu.item(&category, &item_key) {
                    Some(item) => {
                        let picked = PickedItem {
                            key: item.key.clone(),
                            name: item.name.clone(),
                            price: item.price,
                        };
                        session.step = Step::ChoosingQuantity {
                            category,
                            item: picked.clone(),
                        };
                        prompts::quantity(&picked.name)
                    }
                    None => {
                        warn!(%user_id, category = %category, item = %item_key, "Unknown item");
                        match ctx.menu.category(&category) {
                            Some(c) => prompts::items(c),
                            None => {
                                session.step = Step::ChoosingCategory;
                                prompts::categories(
                                    &ctx.menu,
                                    &ctx.config,
                                    session.last_order.is_some(),
                                )
                            }
                        }
                    }
                }
            }

            (Step::ChoosingQuantity { category, .. }, UserEvent::BackToItems) => {
                match ctx.menu.category(&category) {
                    Some(c) => {
                        session.step = Step::ChoosingItem { category };
                        prompts::items(c)
                    }
                    None => {
                        session.step = Step::ChoosingCategory;
                        prompts::categories(&ctx.menu, &ctx.config, session.last_order.is_some())
                    }
                }
            }

            (Step::ChoosingQuantity { item, .. }, UserEvent::QuantityChosen(quantity)) => {
                Self::append_line(session, &item, quantity)
            }

            (Step::ChoosingQuantity { .. }, UserEvent::EnterQuantityManually) => {
                prompts::manual_quantity()
            }

            (Step::ChoosingQuantity { item, .. }, UserEvent::Text(text)) => {
                match parse_quantity(&text) {
                    Ok(quantity) => Self::append_line(session, &item, quantity),
                    Err(e) => {
                        debug!(%user_id, input = %text, error = %e, "Quantity rejected");
                        prompts::quantity_retry()
                    }
                }
            }

            (Step::DecidingExtras, UserEvent::AddMoreItems) => {
                // Loop back to category selection; the accumulated lines stay.
                session.step = Step::ChoosingCategory;
                prompts::categories(&ctx.menu, &ctx.config, session.last_order.is_some())
            }

            (Step::DecidingExtras, UserEvent::ProceedToCheckout) => {
                session.step = Step::ChoosingPickupTime;
                prompts::pickup(&ctx.config)
            }

            (Step::ChoosingPickupTime, UserEvent::PickupChosen(minutes)) => {
                session.draft.pickup_time = Some(format!("In {minutes} minutes"));
                session.step = Step::AwaitingContact;
                prompts::contact(&ctx.config)
            }

            (Step::ChoosingPickupTime, UserEvent::EnterPickupManually) => {
                prompts::manual_pickup()
            }

            (Step::ChoosingPickupTime, UserEvent::Text(text)) => match parse_pickup_time(&text) {
                Ok(pickup_time) => {
                    session.draft.pickup_time = Some(pickup_time);
                    session.step = Step::AwaitingContact;
                    prompts::contact(&ctx.config)
                }
                Err(e) => {
                    debug!(%user_id, input = %text, error = %e, "Pickup time rejected");
                    prompts::fallback()
                }
            },

            (Step::AwaitingContact, UserEvent::Contact { phone, name }) => {
                // This step always advances: a declined share still records
                // the profile name and a placeholder phone.
                session.draft.phone_number =
                    Some(phone.unwrap_or_else(|| PHONE_NOT_PROVIDED.to_string()));
                session.draft.customer_name = Some(name);
                session.step = Step::Confirming;
                prompts::confirm(session)
            }

            (Step::Confirming, UserEvent::CancelOrder) => {
                info!(%user_id, "Order cancelled");
                self.sessions.remove(&user_id);
                prompts::cancelled()
            }

            (_, event) => {
                debug!(%user_id, ?event, "Out-of-sequence event");
                prompts::current_step(session, &ctx.menu, &ctx.config)
            }
        }
    }

    fn append_line(session: &mut Session, item: &PickedItem, quantity: u32) -> Reply {
        session.draft.lines.push(LineItem {
            name: item.name.clone(),
            price: item.price,
            quantity,
        });
        session.step = Step::DecidingExtras;
        prompts::extras(Some((quantity, &item.name)))
    }

    /// Confirms the draft: persist first, then notify. A failed write keeps
    /// the session at confirmation so the user can retry; no success text is
    /// produced and staff hears nothing.
    async fn confirm(&mut self, user_id: UserId, ctx: &SessionContext) -> Reply {
        let Some(session) = self.sessions.get(&user_id) else {
            debug!(%user_id, "Confirmation without a session");
            return prompts::start_over();
        };
        if session.step != Step::Confirming {
            debug!(%user_id, step = ?session.step, "Out-of-sequence confirmation");
            return prompts::current_step(session, &ctx.menu, &ctx.config);
        }

        let Some(params) = session.draft.to_order_create(user_id) else {
            warn!(%user_id, "Confirmation with an incomplete draft");
            self.sessions.remove(&user_id);
            return prompts::start_over();
        };

        match checkout::place_order(&ctx.store, params).await {
            Ok(placed) => {
                Self::notify_staff(&ctx.notifier, &placed).await;
                self.sessions.remove(&user_id);
                Reply::text(placed.customer_text)
            }
            Err(e) => {
                error!(%user_id, error = %e, "Order confirmation failed");
                match self.sessions.get(&user_id) {
                    Some(session) => prompts::confirm_retry(session),
                    None => prompts::start_over(),
                }
            }
        }
    }

    /// One-tap repeat of the user's most recent order: the stored items,
    /// contact, and pickup time are re-persisted as a brand-new order.
    async fn repeat_last_order(&mut self, user_id: UserId, ctx: &SessionContext) -> Reply {
        // Prefer the session's cached last order (set at /start); /repeat can
        // also arrive cold, so fall back to the store.
        let cached = self
            .sessions
            .get(&user_id)
            .and_then(|s| s.last_order.clone());
        let last = match cached {
            Some(order) => Some(order),
            None => match ctx.store.last_user_order(user_id).await {
                Ok(last) => last,
                Err(e) => {
                    warn!(%user_id, error = %e, "Last-order lookup failed");
                    None
                }
            },
        };
        let Some(last) = last else {
            return prompts::no_previous_order();
        };

        let params = Self::reorder_params(user_id, &last);
        match checkout::place_order(&ctx.store, params).await {
            Ok(placed) => {
                Self::notify_staff(&ctx.notifier, &placed).await;
                self.sessions.remove(&user_id);
                Reply::text(placed.customer_text)
            }
            Err(e) => {
                error!(%user_id, error = %e, "Repeat order failed");
                prompts::order_failed()
            }
        }
    }

    fn reorder_params(user_id: UserId, last: &Order) -> OrderCreate {
        OrderCreate {
            user_id,
            user_name: last.user_name.clone(),
            phone_number: last.phone_number.clone(),
            items: last.items.clone(),
            pickup_time: last.pickup_time.clone(),
        }
    }

    /// The order is already durable at this point: a delivery failure is
    /// logged for operator follow-up, not retried, and never rolls back.
    async fn notify_staff(notifier: &Arc<dyn StaffNotifier>, placed: &PlacedOrder) {
        if let Err(e) = notifier.notify(&placed.staff_text).await {
            error!(order_id = %placed.order.order_id, error = %e, "Staff notification failed");
        }
    }
}
