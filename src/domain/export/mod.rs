//! Export module - the versioned snapshot of everything a user owns.
//!
//! The snapshot is assembled once by the export handler and rendered by
//! interchangeable sinks (HTTP attachment, client download, disk file).

mod errors;
mod file;
mod snapshot;

pub use errors::{DataError, ExportError, Resource, GENERIC_FETCH_MESSAGE};
pub use file::{ExportFile, EXPORT_FILE_STEM, JSON_CONTENT_TYPE};
pub use snapshot::{ExportCounts, ExportSnapshot, EXPORT_VERSION};
