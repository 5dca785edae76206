//! Process bootstrap: tracing, configuration, actor system, console loop.

use coffee_bot::config::BotConfig;
use coffee_bot::lifecycle::{setup_tracing, BotSystem};
use coffee_bot::transport::{ConsoleChat, LogStaffNotifier};
use order_flow::model::UserId;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "coffee-bot.json".to_string());
    let config = BotConfig::load(Path::new(&config_path)).map_err(|e| e.to_string())?;
    info!(bot = %config.bot_name, "Starting");
    if config.bot_token.is_empty() {
        warn!("No bot token configured; serving the console transport only");
    }

    let notifier = Arc::new(LogStaffNotifier::new(config.staff_chat_id.clone()));
    let system = BotSystem::start(&config, notifier);

    let user_name = std::env::var("USER").unwrap_or_else(|_| "Guest".to_string());
    let mut chat = ConsoleChat::new(UserId(1), user_name);
    println!(
        "{} — type /start to order, /help for commands, /quit to leave.",
        config.bot_name
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(event) = chat.map_input(line) else {
            break;
        };
        match system.session_client.handle(chat.user_id(), event).await {
            Ok(reply) => chat.render(&reply),
            Err(e) => {
                error!(error = %e, "Session actor unavailable");
                break;
            }
        }
    }

    system.shutdown().await
}
