//! In-memory adapters for tests and local development.

mod in_memory_user_data;

pub use in_memory_user_data::InMemoryUserDataReader;
