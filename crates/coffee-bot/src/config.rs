//! Injected configuration for the bot process.
//!
//! Everything the core treats as injected — credentials, the staff target,
//! id prefix and counter start, pickup choices, message texts, the storage
//! path, and an optional menu override — lives here. Defaults match the
//! original deployment; a JSON file can override any subset of fields, and
//! `BOT_TOKEN` in the environment always wins for the credential.

use order_flow::menu::Menu;
use order_flow::session::FlowConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {0}: {1}")]
    Read(String, String),
    #[error("cannot parse config {0}: {1}")]
    Parse(String, String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Bot credential; `BOT_TOKEN` in the environment takes precedence.
    pub bot_token: String,
    pub bot_name: String,
    /// Chat that receives staff order notifications.
    pub staff_chat_id: String,
    pub welcome_message: String,
    pub contact_request_message: String,
    /// Prefix of formatted order ids, e.g. `COFFEE` in `COFFEE_1000`.
    pub order_prefix: String,
    /// First sequence number issued by an empty store.
    pub order_counter_start: u64,
    /// Pickup time options offered as buttons, in minutes.
    pub pickup_times: Vec<u32>,
    /// Path of the persisted order collection.
    pub storage_file: PathBuf,
    /// Menu override; the built-in catalog when absent.
    pub menu: Option<Menu>,
}

impl Default for BotConfig {
    fn default() -> Self {
        let flow = FlowConfig::default();
        Self {
            bot_token: String::new(),
            bot_name: "Coffee Shop Bot".to_string(),
            staff_chat_id: "YOUR_STAFF_CHAT_ID_HERE".to_string(),
            welcome_message: flow.welcome_message,
            contact_request_message: flow.contact_request_message,
            order_prefix: "COFFEE".to_string(),
            order_counter_start: 1000,
            pickup_times: flow.pickup_choices,
            storage_file: PathBuf::from("orders.json"),
            menu: None,
        }
    }
}

impl BotConfig {
    /// Loads configuration from a JSON file. A missing file yields the
    /// defaults; an unreadable or malformed file is an error, because a
    /// config the operator wrote must not be silently ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                return Err(ConfigError::Read(
                    path.display().to_string(),
                    e.to_string(),
                ))
            }
        };
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            config.bot_token = token;
        }
        Ok(config)
    }

    /// The slice of this config the conversation flow needs.
    pub fn flow(&self) -> FlowConfig {
        FlowConfig {
            welcome_message: self.welcome_message.clone(),
            contact_request_message: self.contact_request_message.clone(),
            pickup_choices: self.pickup_times.clone(),
        }
    }

    /// The menu to serve: the configured override or the built-in catalog.
    pub fn menu(&self) -> Menu {
        self.menu.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployment_values() {
        let config = BotConfig::default();
        assert_eq!(config.order_prefix, "COFFEE");
        assert_eq!(config.order_counter_start, 1000);
        assert_eq!(config.pickup_times, [10, 20, 30]);
        assert_eq!(config.storage_file, PathBuf::from("orders.json"));
        assert!(config.menu.is_none());
        assert!(!config.menu().categories().is_empty());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.bot_name, "Coffee Shop Bot");
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"order_prefix": "TEA", "pickup_times": [5, 15]}"#,
        )
        .unwrap();

        let config = BotConfig::load(&path).unwrap();
        assert_eq!(config.order_prefix, "TEA");
        assert_eq!(config.pickup_times, [5, 15]);
        assert_eq!(config.order_counter_start, 1000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{nope").unwrap();
        assert!(matches!(
            BotConfig::load(&path),
            Err(ConfigError::Parse(_, _))
        ));
    }
}
