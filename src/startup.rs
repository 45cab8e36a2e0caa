//! Process bootstrap shared by the server and the operator script.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::adapters::postgres::{connect_lazy, PgUserDataReader};
use crate::adapters::postgrest::{RestClientError, RestUserDataReader};
use crate::config::{ConfigError, ServerConfig, StoreBackend, StoreConfig, ValidationError};
use crate::ports::UserDataReader;

/// Errors that abort process startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Failed to create database pool: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to create store HTTP client: {0}")]
    HttpClient(#[from] RestClientError),

    #[error("Failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. Production emits JSON lines.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Builds the `UserDataReader` for the configured backend.
pub fn user_data_reader(store: &StoreConfig) -> Result<Arc<dyn UserDataReader>, StartupError> {
    match store.backend {
        StoreBackend::Postgres => {
            let pool = connect_lazy(store)?;
            tracing::info!(max_connections = store.max_connections, "using postgres store");
            Ok(Arc::new(PgUserDataReader::new(pool)))
        }
        StoreBackend::Rest => {
            let key = store
                .service_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("STORE__SERVICE_KEY"))?;
            let reader = RestUserDataReader::new(&store.rest_url, key, store.http_timeout())?;
            tracing::info!(url = %store.rest_url, "using postgrest store");
            Ok(Arc::new(reader))
        }
    }
}
