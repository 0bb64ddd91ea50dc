//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AFDIAN_BRIDGE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use afdian_bridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod afdian;
mod database;
mod error;
mod exchange;
mod notify;
mod origin;
mod server;

pub use afdian::AfdianConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use exchange::ExchangeConfig;
pub use notify::NotifyConfig;
pub use origin::OriginConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section defaults so that [`AppConfig::validate()`] can name the
/// missing required values instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Order ledger database (SQLite file)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Origin storage site (site URL, communication key)
    #[serde(default)]
    pub origin: OriginConfig,

    /// Afdian account (user id, API token)
    #[serde(default)]
    pub afdian: AfdianConfig,

    /// Currency conversion lookup
    #[serde(default)]
    pub exchange: ExchangeConfig,

    /// Paid-order notification retries
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Unprefixed variable names read by earlier deployments, and the keys they fill.
const LEGACY_ENV: [(&str, &str); 6] = [
    ("SITE_URL", "origin.site_url"),
    ("COMMUNICATION_KEY", "origin.communication_key"),
    ("USER_ID", "afdian.user_id"),
    ("TOKEN", "afdian.token"),
    ("PORT", "server.port"),
    ("DB_PATH", "database.path"),
];

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AFDIAN_BRIDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to the unprefixed names of earlier deployments
    ///    (`SITE_URL`, `TOKEN`, `PORT`, ...) for values the prefixed
    ///    variables leave unset
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AFDIAN_BRIDGE__SERVER__PORT=9000` -> `server.port = 9000`
    /// - `AFDIAN_BRIDGE__AFDIAN__USER_ID=...` -> `afdian.user_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (var, key) in LEGACY_ENV {
            if let Some(value) = std::env::var(var).ok().filter(|v| !v.is_empty()) {
                builder = builder.set_default(key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("AFDIAN_BRIDGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first missing or invalid value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.origin.validate()?;
        self.afdian.validate()?;
        self.exchange.validate()?;
        self.notify.validate()?;
        Ok(())
    }
}
