//! Image preview encoding.
//!
//! Previews are `data:` URLs so they can be dropped straight into an
//! `<img src>` without creating (and later revoking) Blob URLs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::FileInfo;

/// Encode `contents` as a base64 `data:` URL with the given MIME type.
#[must_use]
pub fn data_url(mime_type: &str, contents: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(contents))
}

/// Build the preview for a file, or `None` if it is not an image.
#[must_use]
pub fn preview_for(info: &FileInfo, contents: &[u8]) -> Option<String> {
    info.is_image()
        .then(|| data_url(&info.mime_type, contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_has_mime_and_base64_payload() {
        assert_eq!(data_url("image/png", b"hello"), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn empty_contents_encode_to_empty_payload() {
        assert_eq!(data_url("image/gif", &[]), "data:image/gif;base64,");
    }

    #[test]
    fn images_get_a_preview() {
        let info = FileInfo::new("cat.jpg", 3, "image/jpeg");
        assert_eq!(
            preview_for(&info, &[0xff, 0xd8, 0xff]).as_deref(),
            Some("data:image/jpeg;base64,/9j/")
        );
    }

    #[test]
    fn non_images_get_no_preview() {
        let info = FileInfo::new("notes.txt", 5, "text/plain");
        assert_eq!(preview_for(&info, b"hello"), None);
    }
}
