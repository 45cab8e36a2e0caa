//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserDataReader` - Per-user reads from the hosted data store
//! - `SessionValidator` - Access token verification
//! - `ExportSink` - Delivery boundary for a rendered export

mod export_sink;
mod session_validator;
mod user_data_reader;

pub use export_sink::ExportSink;
pub use session_validator::SessionValidator;
pub use user_data_reader::UserDataReader;
