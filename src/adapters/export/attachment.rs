//! HTTP attachment sink.

use async_trait::async_trait;

use crate::domain::export::{ExportError, ExportFile, ExportSnapshot};
use crate::domain::foundation::UserId;
use crate::ports::ExportSink;

/// Renders `resonance-data-export.json` for an HTTP response body.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentSink;

#[async_trait]
impl ExportSink for AttachmentSink {
    type Receipt = ExportFile;

    async fn deliver(
        &self,
        _user_id: &UserId,
        snapshot: &ExportSnapshot,
    ) -> Result<ExportFile, ExportError> {
        ExportFile::json(ExportFile::attachment_name(), snapshot)
    }
}
