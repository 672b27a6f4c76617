//! Capture-date extraction from EXIF metadata.

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Fixed encoding of EXIF date fields.
const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// EXIF tags probed for the capture timestamp, in priority order.
///
/// `DateTime` from the primary IFD is checked first, then the original and
/// digitized timestamps.
const DATE_TAGS: [Tag; 3] = [Tag::DateTime, Tag::DateTimeOriginal, Tag::DateTimeDigitized];

/// Extract the capture date from a photo and render it with `template`.
///
/// Returns `None` when the file carries no usable capture timestamp: missing
/// EXIF segment, none of the date tags present, or an unparseable value.
/// That is not an error; the caller substitutes the configured fallback
/// text. I/O and image decode problems surface later when the render stage
/// opens the image, so they stay a distinct per-file failure.
pub fn extract_capture_date(path: &Path, template: &str) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader).ok()?;

    for tag in DATE_TAGS {
        if let Some(field) = exif.get_field(tag, In::PRIMARY) {
            if let Value::Ascii(ref values) = field.value {
                let raw = values
                    .first()
                    .and_then(|bytes| std::str::from_utf8(bytes).ok());
                if let Some(formatted) = raw.and_then(|s| format_exif_timestamp(s, template)) {
                    return Some(formatted);
                }
            }
        }
    }

    None
}

/// Parse an EXIF `YYYY:MM:DD HH:MM:SS` value and render it with `template`.
///
/// Returns `None` for values that do not match the fixed EXIF encoding.
pub fn format_exif_timestamp(raw: &str, template: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(raw.trim(), EXIF_DATE_FORMAT).ok()?;
    render_template(&parsed, template)
}

// chrono reports a bad template through the Display impl, so render into a
// String by hand instead of format!, which would panic on the error.
fn render_template(timestamp: &NaiveDateTime, template: &str) -> Option<String> {
    use std::fmt::Write;

    let mut out = String::new();
    write!(out, "{}", timestamp.format(template)).ok()?;
    Some(out)
}
