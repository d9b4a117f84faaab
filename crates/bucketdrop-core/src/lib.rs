//! bucketdrop-core: Upload widget state machine and shared types (sans-IO).
//!
//! Holds everything about a single-file upload that does not touch the
//! browser or the network: file metadata and size validation, the
//! image preview encoding, the widget state machine with its stale-result
//! guards, and the request/response types exchanged with the storage API.
//!
//! This crate has **no I/O dependencies**. Reading files and sending
//! requests lives in `bucketdrop-io`.

pub mod preview;
pub mod size;
pub mod types;
pub mod widget;

pub use size::{MAX_FILE_SIZE, format_size};
pub use types::{FileInfo, SelectedFile, UploadError, UploadResponse};
pub use widget::{SelectionToken, UploadRequest, UploadStatus, UploadTicket, UploadWidget};
