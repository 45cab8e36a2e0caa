//! Export delivery adapters.
//!
//! Implementations of the `ExportSink` port, one per delivery boundary:
//!
//! - `AttachmentSink` - HTTP response attachment with a fixed filename
//! - `DownloadSink` - client-side download named with the export date
//! - `DiskSink` - operator file on local disk named with user id and date

mod attachment;
mod disk;
mod download;

pub use attachment::AttachmentSink;
pub use disk::DiskSink;
pub use download::DownloadSink;
