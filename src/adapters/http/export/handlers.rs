//! HTTP handlers for export endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::export::{AttachmentSink, DownloadSink};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{ExportUserDataHandler, ExportUserDataQuery};
use crate::domain::export::{ExportError, ExportFile};

// ════════════════════════════════════════════════════════════════════════════════
// State
// ════════════════════════════════════════════════════════════════════════════════

/// Application state for export endpoints.
#[derive(Clone)]
pub struct ExportAppState {
    pub export_handler: Arc<ExportUserDataHandler>,
}

impl ExportAppState {
    pub fn new(export_handler: Arc<ExportUserDataHandler>) -> Self {
        Self { export_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/export - Export as `resonance-data-export.json` attachment
pub async fn export_attachment(
    State(state): State<ExportAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ExportApiError> {
    let query = ExportUserDataQuery { user_id: user.id };
    let file = state.export_handler.deliver(query, &AttachmentSink).await?;
    Ok(file_response(file))
}

/// GET /api/export/download - Export named with the export date
pub async fn download_export(
    State(state): State<ExportAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ExportApiError> {
    let query = ExportUserDataQuery { user_id: user.id };
    let file = state.export_handler.deliver(query, &DownloadSink).await?;
    Ok(file_response(file))
}

fn file_response(file: ExportFile) -> Response {
    let disposition = HeaderValue::from_str(&file.content_disposition())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error that turns an `ExportError` into a response without leaking detail.
#[derive(Debug)]
pub struct ExportApiError(pub ExportError);

impl From<ExportError> for ExportApiError {
    fn from(err: ExportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ExportApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ExportError::Unauthorized => StatusCode::UNAUTHORIZED,
            ExportError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "export request failed");
        }

        (
            status,
            Json(serde_json::json!({ "error": self.0.user_message() })),
        )
            .into_response()
    }
}
