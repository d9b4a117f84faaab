//! Shared types for bucketdrop uploads.

use serde::{Deserialize, Serialize};

use crate::size::{MAX_FILE_SIZE, format_size};

/// Message shown when an upload fails without a server-provided reason.
pub const DEFAULT_UPLOAD_FAILURE: &str = "Error uploading the file. Please try again.";

/// Metadata for a file chosen by drag-and-drop or the file picker.
///
/// Available before the file contents are read, so validation can reject
/// an oversized file without loading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// File name as reported by the browser (no directory component).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, e.g. `image/png`.  Empty when the browser does not know.
    pub mime_type: String,
}

impl FileInfo {
    /// Create file metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Returns `true` if the MIME type denotes an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Reject files larger than [`MAX_FILE_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::FileTooLarge`] if `size` exceeds the limit.
    pub const fn check_size(&self) -> Result<(), UploadError> {
        if self.size > MAX_FILE_SIZE {
            Err(UploadError::FileTooLarge {
                size: self.size,
                limit: MAX_FILE_SIZE,
            })
        } else {
            Ok(())
        }
    }
}

/// A file whose contents have been read and that can be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File metadata.
    pub info: FileInfo,
    /// Raw file bytes.
    pub contents: Vec<u8>,
}

impl SelectedFile {
    /// Create a selected file from metadata and contents.
    #[must_use]
    pub const fn new(info: FileInfo, contents: Vec<u8>) -> Self {
        Self { info, contents }
    }

    /// File name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.info.mime_type
    }
}

/// JSON body returned by `POST /v1/files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Whether the server stored the file.
    pub success: bool,
    /// Human-readable status message from the server.
    pub message: String,
    /// Name under which the file was stored.
    pub file_name: String,
}

/// Error body returned by the storage API on failure.
///
/// Only `message` is inspected; other fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Failure description, when the server provides one.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract a non-empty `message` from a raw response body.
    ///
    /// Returns `None` for non-JSON bodies, bodies without a `message`
    /// field, and blank messages.
    #[must_use]
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Errors surfaced by the upload widget and client.
///
/// Every variant is recoverable: the user may pick another file or
/// retry the upload immediately.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The file exceeds the size limit.
    #[error("file is {size} bytes, exceeding the {limit}-byte limit")]
    FileTooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Maximum accepted size in bytes.
        limit: u64,
    },

    /// The browser failed to read the file contents.
    #[error("failed to read file: {0}")]
    ReadFailed(String),

    /// The server answered with a failure.
    #[error("server rejected upload (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, if any.
        message: Option<String>,
    },

    /// The request could not be sent or its response could not be decoded.
    #[error("upload request failed: {0}")]
    Transport(String),
}

impl UploadError {
    /// The message shown to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::FileTooLarge { limit, .. } => {
                format!("The file is too large. Maximum size is {}", format_size(*limit))
            }
            Self::ReadFailed(e) => format!("Failed to read file: {e}"),
            Self::Server {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Server { message: None, .. } | Self::Transport(_) => {
                DEFAULT_UPLOAD_FAILURE.to_owned()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_types_are_images() {
        assert!(FileInfo::new("a.png", 1, "image/png").is_image());
        assert!(FileInfo::new("a.svg", 1, "image/svg+xml").is_image());
    }

    #[test]
    fn non_image_mime_types_are_not_images() {
        assert!(!FileInfo::new("a.pdf", 1, "application/pdf").is_image());
        assert!(!FileInfo::new("a", 1, "").is_image());
        assert!(!FileInfo::new("a.txt", 1, "text/image").is_image());
    }

    #[test]
    fn size_at_limit_is_accepted() {
        let info = FileInfo::new("a.bin", MAX_FILE_SIZE, "application/octet-stream");
        assert_eq!(info.check_size(), Ok(()));
    }

    #[test]
    fn size_over_limit_is_rejected() {
        let info = FileInfo::new("a.bin", MAX_FILE_SIZE + 1, "application/octet-stream");
        assert_eq!(
            info.check_size(),
            Err(UploadError::FileTooLarge {
                size: MAX_FILE_SIZE + 1,
                limit: MAX_FILE_SIZE,
            })
        );
    }

    #[test]
    fn response_uses_camel_case_file_name() {
        let json = r#"{"success":true,"message":"stored","fileName":"cat.png"}"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, "stored");
        assert_eq!(resp.file_name, "cat.png");
    }

    #[test]
    fn error_body_message_is_extracted() {
        let body = r#"{"success":false,"message":"bucket unavailable","fileName":"a"}"#;
        assert_eq!(
            ErrorBody::message_from(body),
            Some("bucket unavailable".to_owned())
        );
    }

    #[test]
    fn error_body_without_message_yields_none() {
        assert_eq!(ErrorBody::message_from(r#"{"error":"x"}"#), None);
        assert_eq!(ErrorBody::message_from(r#"{"message":"  "}"#), None);
        assert_eq!(ErrorBody::message_from("<html>502</html>"), None);
        assert_eq!(ErrorBody::message_from(""), None);
    }

    #[test]
    fn too_large_user_message_mentions_limit() {
        let err = UploadError::FileTooLarge {
            size: MAX_FILE_SIZE + 1,
            limit: MAX_FILE_SIZE,
        };
        assert_eq!(
            err.user_message(),
            "The file is too large. Maximum size is 10 MB"
        );
    }

    #[test]
    fn server_message_is_preferred() {
        let err = UploadError::Server {
            status: 500,
            message: Some("disk full".into()),
        };
        assert_eq!(err.user_message(), "disk full");
    }

    #[test]
    fn missing_server_message_falls_back_to_default() {
        let err = UploadError::Server {
            status: 502,
            message: None,
        };
        assert_eq!(err.user_message(), DEFAULT_UPLOAD_FAILURE);
        let err = UploadError::Transport("connection refused".into());
        assert_eq!(err.user_message(), DEFAULT_UPLOAD_FAILURE);
    }
}
