//! Operator export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Settings for the operator export script
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory export files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.out_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyOutDir);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("exports")
}
