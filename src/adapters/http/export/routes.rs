//! Route configuration for export endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{download_export, export_attachment, ExportAppState};

/// Creates the export router.
///
/// Routes:
/// - `GET /api/export` - Snapshot as an attachment with a fixed filename
/// - `GET /api/export/download` - Snapshot named with the export date
pub fn export_routes() -> Router<ExportAppState> {
    Router::new()
        .route("/api/export", get(export_attachment))
        .route("/api/export/download", get(download_export))
}
