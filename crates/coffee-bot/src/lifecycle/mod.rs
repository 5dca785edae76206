//! # System Lifecycle
//!
//! Wiring and teardown of the actor system:
//!
//! 1. **Create** — open the order ledger, create the store and session
//!    actors with their clients.
//! 2. **Wire** — inject the session actor's dependencies (menu, store
//!    client, staff notifier, flow config) through `run(context)`.
//! 3. **Run** — spawn each actor's loop in its own task.
//! 4. **Shut down** — drop the clients so the mailboxes close, then await
//!    every task. The dependency graph is acyclic, so channel closure
//!    cascades: the session actor exits first and its context drop releases
//!    the last store sender.
//!
//! [`setup_tracing`] initializes the process-wide subscriber.

mod system;
mod tracing;

pub use self::tracing::setup_tracing;
pub use system::BotSystem;
