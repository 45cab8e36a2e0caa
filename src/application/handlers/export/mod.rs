//! Export application handlers.

mod export_user_data;

pub use export_user_data::{ExportUserDataHandler, ExportUserDataQuery};
