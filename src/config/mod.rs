//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `SOCIALITE` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use socialite::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, CORS, cookies)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; unused by in-memory runs
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session tokens and password hashing
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` when present, then reads `SOCIALITE__*` variables:
    ///
    /// - `SOCIALITE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SOCIALITE__DATABASE__URL=...` -> `database.url = ...`
    /// - `SOCIALITE__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SOCIALITE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate every section, including the database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_without_database()?;
        self.database.validate()?;
        Ok(())
    }

    /// Validate for a run backed by in-memory storage.
    pub fn validate_without_database(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
