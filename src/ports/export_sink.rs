//! ExportSink port - the delivery boundary of an export.
//!
//! A sink renders an already-assembled snapshot into a concrete output.
//! Sinks never fetch; every delivery path shares the single aggregation
//! in `ExportUserDataHandler`.

use async_trait::async_trait;

use crate::domain::export::{ExportError, ExportSnapshot};
use crate::domain::foundation::UserId;

/// Renders a snapshot for one delivery boundary.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// What the caller gets back: a file to serve, or where it was written.
    type Receipt: Send;

    async fn deliver(
        &self,
        user_id: &UserId,
        snapshot: &ExportSnapshot,
    ) -> Result<Self::Receipt, ExportError>;
}
