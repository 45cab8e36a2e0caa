//! Connection pool construction.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::StoreConfig;

/// Builds a lazily-connecting pool from store configuration.
///
/// Connections are opened on first use, so a misconfigured database
/// surfaces as a data-layer error on the first export rather than at boot.
pub fn connect_lazy(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy(&config.database_url)
}
