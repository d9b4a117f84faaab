//! Dioxus UI components for bucketdrop.
//!
//! Provides the drag-and-drop upload zone and the card describing the
//! selected file.

mod file_card;
mod upload;

pub use file_card::FileCard;
pub use upload::FileUpload;
