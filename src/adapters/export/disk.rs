//! Local disk sink for operator-initiated exports.
//!
//! Writes `<dir>/resonance-data-export-<userId>-<YYYY-MM-DD>.json` using a
//! write-to-temp-then-rename pattern so a crash never leaves a truncated
//! export behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::export::{ExportError, ExportFile, ExportSnapshot};
use crate::domain::foundation::{UserId, ValidationError};
use crate::ports::ExportSink;

/// Writes exports into a local directory.
#[derive(Debug, Clone)]
pub struct DiskSink {
    dir: PathBuf,
}

impl DiskSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The user id becomes part of a filename; reject anything that could
    /// escape the export directory.
    fn ensure_file_safe(user_id: &UserId) -> Result<(), ExportError> {
        let id = user_id.as_str();
        if id.contains(['/', '\\']) || id.contains("..") {
            return Err(ValidationError::invalid_format("user_id", "must not contain path components").into());
        }
        Ok(())
    }
}

#[async_trait]
impl ExportSink for DiskSink {
    type Receipt = PathBuf;

    async fn deliver(
        &self,
        user_id: &UserId,
        snapshot: &ExportSnapshot,
    ) -> Result<PathBuf, ExportError> {
        Self::ensure_file_safe(user_id)?;

        let file = ExportFile::json(
            ExportFile::user_dated_name(user_id, &snapshot.export_date),
            snapshot,
        )?;

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            ExportError::Io(format!(
                "Failed to create export directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.dir.join(&file.filename);
        let temp_path = self.dir.join(format!("{}.tmp", file.filename));

        if let Err(e) = write_then_rename(&temp_path, &path, &file.body).await {
            // Best effort; the write error is what gets reported.
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::info!(path = %path.display(), bytes = file.body.len(), "export written to disk");
        Ok(path)
    }
}

async fn write_then_rename(temp_path: &Path, path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut out = fs::File::create(temp_path).await?;
    out.write_all(body).await?;
    out.sync_all().await?;
    drop(out);
    fs::rename(temp_path, path).await
}
