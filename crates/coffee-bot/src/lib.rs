//! # coffee-bot
//!
//! The runnable bot around the [`order_flow`] core: configuration loading,
//! the console chat transport, and the actor-system lifecycle. Exposed as a
//! library so integration tests can drive the wired system.

pub mod config;
pub mod lifecycle;
pub mod transport;
