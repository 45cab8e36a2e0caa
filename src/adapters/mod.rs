//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - `UserDataReader` over a direct PostgreSQL pool (sqlx)
//! - `postgrest` - `UserDataReader` over the hosted store's REST facade (reqwest)
//! - `memory` - In-memory `UserDataReader` for tests and local development
//! - `auth` - `SessionValidator` implementations
//! - `export` - `ExportSink` implementations for each delivery boundary
//! - `http` - axum routes, middleware and router

pub mod auth;
pub mod export;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod postgrest;
