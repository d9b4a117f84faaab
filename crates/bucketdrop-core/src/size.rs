//! File size limit and human-readable size formatting.

/// Largest file the widget accepts, in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Unit labels for [`format_size`], in ascending powers of 1024.
const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with binary (1024-based) units.
///
/// The value is rounded to two decimal places and printed without
/// trailing zeros, so `1536` becomes `"1.5 KB"` and `1024` becomes
/// `"1 KB"`.  Sizes beyond the gigabyte range stay in GB.
///
/// ```
/// use bucketdrop_core::format_size;
///
/// assert_eq!(format_size(0), "0 Bytes");
/// assert_eq!(format_size(1_048_576), "1 MB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return String::from("0 Bytes");
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit + 1 < UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    #[expect(clippy::cast_precision_loss)]
    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}
