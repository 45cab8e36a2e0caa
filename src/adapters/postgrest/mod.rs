//! PostgREST adapters - the hosted store's REST facade over PostgreSQL.

mod user_data_reader;

pub use user_data_reader::{RestClientError, RestUserDataReader};
