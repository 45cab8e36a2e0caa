//! HTTP adapters - axum surface for the export service.

pub mod export;
pub mod middleware;
mod router;

pub use export::{ExportApiError, ExportAppState};
pub use router::app_router;
