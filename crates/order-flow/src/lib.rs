//! # order-flow
//!
//! Conversational order-taking core for a small take-away business.
//!
//! ## Components
//!
//! - [`menu`]: the read-only catalog of categories and priced items.
//! - [`store`]: the durable order collection with sequential id allocation,
//!   owned by a single-writer actor.
//! - [`session`]: the per-user conversation state machine (category → item →
//!   quantity → extras → pickup → contact → confirmation), owned by an actor
//!   that processes one event at a time.
//! - [`checkout`]: draft-to-order assembly plus the customer/staff texts.
//! - [`error`]: the error taxonomy, split by recovery policy.
//! - [`mock`]: channel-level mock clients for testing logic around the
//!   store client without spawning actors.
//!
//! The chat transport stays outside this crate: it feeds
//! [`UserEvent`](session::UserEvent)s into a [`SessionClient`](session::SessionClient)
//! and renders the [`Reply`](session::Reply)s it gets back.

pub mod checkout;
pub mod error;
pub mod menu;
pub mod mock;
pub mod model;
pub mod session;
pub mod store;
