//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RESONANCE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use resonance::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod auth;
mod error;
mod export;
mod server;
mod store;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Data store configuration (PostgreSQL or PostgREST)
    #[serde(default)]
    pub store: StoreConfig,

    /// Access token verification
    #[serde(default)]
    pub auth: AuthConfig,

    /// Operator export script
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RESONANCE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RESONANCE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RESONANCE__STORE__BACKEND=rest` -> `store.backend = rest`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RESONANCE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate everything the HTTP server needs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.store.validate(&self.server.environment)?;
        self.auth.validate()?;
        Ok(())
    }

    /// Validate everything the operator script needs (no auth section).
    pub fn validate_for_export(&self) -> Result<(), ValidationError> {
        self.store.validate(&self.server.environment)?;
        self.export.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
