//! HTTP adapter for the user data export endpoints.

mod handlers;
mod routes;

pub use handlers::{download_export, export_attachment, ExportApiError, ExportAppState};
pub use routes::export_routes;
