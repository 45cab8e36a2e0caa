//! PostgreSQL adapters - Database implementations for read ports.
//!
//! - `PgUserDataReader` - Per-user reads for exports
//! - `connect_lazy` - Pool construction from `StoreConfig`

mod pool;
mod user_data_reader;

pub use pool::connect_lazy;
pub use user_data_reader::PgUserDataReader;
