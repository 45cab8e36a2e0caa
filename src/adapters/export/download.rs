//! Client download sink.

use async_trait::async_trait;

use crate::domain::export::{ExportError, ExportFile, ExportSnapshot};
use crate::domain::foundation::UserId;
use crate::ports::ExportSink;

/// Renders `resonance-data-export-<YYYY-MM-DD>.json`, dated by the
/// snapshot's `exportDate`, for the browser to save.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadSink;

#[async_trait]
impl ExportSink for DownloadSink {
    type Receipt = ExportFile;

    async fn deliver(
        &self,
        _user_id: &UserId,
        snapshot: &ExportSnapshot,
    ) -> Result<ExportFile, ExportError> {
        ExportFile::json(ExportFile::dated_name(&snapshot.export_date), snapshot)
    }
}
