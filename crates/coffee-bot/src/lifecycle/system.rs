use crate::config::BotConfig;
use order_flow::checkout::StaffNotifier;
use order_flow::session::{self, SessionClient, SessionContext};
use order_flow::store::{self, OrderStoreClient};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the bot's actor system.
pub struct BotSystem {
    /// Client the transport feeds user events into.
    pub session_client: SessionClient,

    /// Client for direct store access (staff tooling, tests).
    pub store_client: OrderStoreClient,

    /// Task handles for all running actors, used for graceful shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BotSystem {
    /// Opens the ledger and starts all actors with their dependencies wired.
    pub fn start(config: &BotConfig, notifier: Arc<dyn StaffNotifier>) -> Self {
        // 1. Create the actors (no dependencies yet).
        let (store_actor, store_client) = store::new(
            &config.storage_file,
            config.order_prefix.clone(),
            config.order_counter_start,
        );
        let (session_actor, session_client) = session::new(32);

        // 2. Start actors with injected context. The store has no
        //    dependencies; the session actor gets everything it needs.
        let store_handle = tokio::spawn(store_actor.run());
        let session_handle = tokio::spawn(session_actor.run(SessionContext {
            menu: Arc::new(config.menu()),
            store: store_client.clone(),
            notifier,
            config: Arc::new(config.flow()),
        }));

        Self {
            session_client,
            store_client,
            handles: vec![store_handle, session_handle],
        }
    }

    /// Gracefully shuts down the whole system: drop the clients so the
    /// actors drain their mailboxes and exit, then await every task.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.session_client);
        drop(self.store_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {e:?}");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }
        info!("System shutdown complete.");
        Ok(())
    }
}
