//! bucketdrop-io: Upload client and Dioxus component library.
//!
//! Sends files to the storage API as multipart form data, resolves the
//! API base URL from the hosting page or the build environment, and
//! provides the drag-and-drop upload components for the bucketdrop web
//! application.

pub mod client;
pub mod components;
pub mod config;

pub use client::UploadClient;
pub use components::{FileCard, FileUpload};
pub use config::{ClientConfig, ConfigError};
