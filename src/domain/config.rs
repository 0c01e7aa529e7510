//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat service, bot behaviour and each responder's external service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub responders: RespondersConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)
    }
}

/// Configuration for the connected chat services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub homeserver: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Who may talk to the bot and what it says when it comes and goes.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_bye")]
    pub bye: String,
    #[serde(default)]
    pub send_greeting: bool,
    #[serde(default)]
    pub send_bye: bool,
    /// Only senders in `allowed_users` may use the bot
    #[serde(default)]
    pub restrict: bool,
    /// Dispatch text messages sent from the bot's own account
    #[serde(default = "default_true")]
    pub allow_self: bool,
    #[serde(default)]
    pub allowed_users: Vec<String>,
    /// Rooms that receive the greeting and bye messages. Empty means every joined room.
    #[serde(default)]
    pub announce_rooms: Vec<String>,
    #[serde(default)]
    pub auto_mark_read: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            bye: default_bye(),
            send_greeting: false,
            send_bye: false,
            restrict: false,
            allow_self: true,
            allowed_users: Vec::new(),
            announce_rooms: Vec::new(),
            auto_mark_read: false,
        }
    }
}

fn default_greeting() -> String {
    "Switchboard is online now, send help for more information".to_string()
}

fn default_bye() -> String {
    "Switchboard is offline now, thank you for using :)".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct RespondersConfig {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub stock: StockConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

/// An API key given inline or through an environment variable.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ApiKey {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>, // e.g. "OPENWEATHER_API_KEY"
}

impl ApiKey {
    /// Inline key first, then the named environment variable.
    pub fn resolve(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| {
                self.api_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|k| !k.is_empty())
            })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    #[serde(flatten)]
    pub key: ApiKey,
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_city_id")]
    pub city_id: u64,
    #[serde(default = "default_city_name")]
    pub city_name: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_cache_minutes")]
    pub cache_minutes: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            key: ApiKey::default(),
            base_url: default_weather_url(),
            city_id: default_city_id(),
            city_name: default_city_name(),
            units: default_units(),
            cache_minutes: default_cache_minutes(),
        }
    }
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".to_string()
}
fn default_city_id() -> u64 {
    6167865
}
fn default_city_name() -> String {
    "Toronto".to_string()
}
fn default_units() -> String {
    "metric".to_string()
}
fn default_cache_minutes() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct StockConfig {
    #[serde(flatten)]
    pub key: ApiKey,
    #[serde(default = "default_stock_url")]
    pub base_url: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            key: ApiKey::default(),
            base_url: default_stock_url(),
        }
    }
}

fn default_stock_url() -> String {
    "https://www.alphavantage.co/query".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslateConfig {
    #[serde(flatten)]
    pub key: ApiKey,
    #[serde(default = "default_translate_url")]
    pub base_url: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            key: ApiKey::default(),
            base_url: default_translate_url(),
        }
    }
}

fn default_translate_url() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotesConfig {
    #[serde(default = "default_notes_path")]
    pub path: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            path: default_notes_path(),
        }
    }
}

fn default_notes_path() -> String {
    "data/user_notes.json".to_string()
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> String {
    "data".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
services:
  matrix:
    homeserver: https://matrix.example.org
    username: bot
    password: secret
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.services.matrix.username, "bot");
        assert!(config.bot.allow_self);
        assert!(!config.bot.restrict);
        assert_eq!(config.responders.weather.city_id, 6167865);
        assert_eq!(config.responders.weather.cache_minutes, 10);
        assert_eq!(config.responders.notes.path, "data/user_notes.json");
        assert_eq!(config.system.log_dir, "data");
    }

    #[test]
    fn test_responder_sections() {
        let yaml = format!(
            "{MINIMAL}{}",
            r#"
bot:
  restrict: true
  allowed_users: ["@alice:example.org"]
responders:
  weather:
    api_key: abc
    city_name: Berlin
    cache_minutes: 5
  stock:
    api_key_env: SWITCHBOARD_TEST_UNSET_VAR
"#
        );
        let config = AppConfig::from_yaml(&yaml).unwrap();
        assert!(config.bot.restrict);
        assert_eq!(config.bot.allowed_users, vec!["@alice:example.org"]);
        assert_eq!(config.responders.weather.key.resolve().as_deref(), Some("abc"));
        assert_eq!(config.responders.weather.city_name, "Berlin");
        assert_eq!(config.responders.weather.units, "metric");
        assert_eq!(config.responders.stock.key.resolve(), None);
    }

    #[test]
    fn test_missing_services_is_an_error() {
        assert!(AppConfig::from_yaml("bot:\n  restrict: true\n").is_err());
    }
}
