//! MIME detection for image inputs.

use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME type from the magic number at the start of `bytes`.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|kind| kind.mime_type())
}

/// MIME type implied by the file extension of `path`.
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    mime_guess::from_path(path).first_raw()
}

/// MIME type for an image read from `path` (if any).
///
/// Content wins over the extension; unrecognized input is `application/octet-stream`.
pub fn guess_mime(bytes: &[u8], path: Option<&Path>) -> &'static str {
    sniff_mime(bytes)
        .or_else(|| path.and_then(mime_from_extension))
        .unwrap_or(FALLBACK_MIME)
}
