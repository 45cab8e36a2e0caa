//! A rendered export, ready to hand to a delivery boundary.

use super::{ExportError, ExportSnapshot};
use crate::domain::foundation::{Timestamp, UserId};

/// Common filename stem for every export artifact.
pub const EXPORT_FILE_STEM: &str = "resonance-data-export";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialized snapshot plus the filename it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ExportFile {
    /// Renders `snapshot` as pretty JSON under `filename`.
    pub fn json(filename: impl Into<String>, snapshot: &ExportSnapshot) -> Result<Self, ExportError> {
        Ok(Self {
            filename: filename.into(),
            content_type: JSON_CONTENT_TYPE,
            body: snapshot.to_json_pretty()?,
        })
    }

    /// `resonance-data-export.json`
    pub fn attachment_name() -> String {
        format!("{EXPORT_FILE_STEM}.json")
    }

    /// `resonance-data-export-<YYYY-MM-DD>.json`
    pub fn dated_name(date: &Timestamp) -> String {
        format!("{EXPORT_FILE_STEM}-{}.json", date.iso_date())
    }

    /// `resonance-data-export-<userId>-<YYYY-MM-DD>.json`
    pub fn user_dated_name(user_id: &UserId, date: &Timestamp) -> String {
        format!("{EXPORT_FILE_STEM}-{}-{}.json", user_id, date.iso_date())
    }

    /// Value for the `Content-Disposition` response header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}
