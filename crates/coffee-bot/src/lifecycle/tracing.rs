//! Observability setup.
//!
//! Structured logging with the `tracing` crate: actor lifecycle events,
//! every store mutation, and each conversation event are logged with
//! structured fields. Levels come from `RUST_LOG` (`info` shows the
//! workflow, `debug` adds full event payloads).

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // actors tag their own context fields
        .compact()
        .init();
}
