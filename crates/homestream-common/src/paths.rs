//! Path utilities for streamable media files.
//!
//! The extension to MIME table is fixed. Unknown extensions are served as
//! `video/mp4` rather than `application/octet-stream`; existing clients
//! depend on that.

use std::path::Path;

/// Content type used when the extension is missing or not in the table.
pub const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

/// Extension to MIME type lookup table.
const VIDEO_CONTENT_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
];

/// Determine the content type of a media file from its extension.
///
/// Matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use homestream_common::paths::content_type_for;
///
/// assert_eq!(content_type_for(Path::new("movie.mkv")), "video/x-matroska");
/// assert_eq!(content_type_for(Path::new("clip.WEBM")), "video/webm");
/// assert_eq!(content_type_for(Path::new("notes.txt")), "video/mp4");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_CONTENT_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
