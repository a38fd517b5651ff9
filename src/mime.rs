//! MIME type helpers
//!
//! Maps MIME types to the short file extensions reported to the host, and
//! guesses MIME types for local files.

use std::collections::HashMap;
use std::path::Path;

use mime_guess::MimeGuess;
use once_cell::sync::Lazy;

/// How many leading bytes content sniffing needs to look at.
pub const SNIFF_LEN: usize = 8192;

static MIME_EXTENSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("application/pdf", "pdf"),
        ("image/jpeg", "jpg"),
        ("image/png", "png"),
        ("text/plain", "txt"),
        (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "docx",
        ),
    ])
});

/// Returns the extension (without a dot) for a MIME type, or `""` if the type
/// is not one we know. Matching is case-insensitive.
pub fn extension_for_mime_type(mime_type: &str) -> &'static str {
    MIME_EXTENSIONS
        .get(mime_type.to_lowercase().as_str())
        .copied()
        .unwrap_or("")
}

/// Returns everything after the last `.` of a file name, or `""`.
pub fn extension_from_file_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[idx + 1..],
        None => "",
    }
}

pub struct MimeResolver;

impl MimeResolver {
    /// Guesses the MIME type from the path's extension.
    pub fn guess_from_path(path: &Path) -> Option<String> {
        MimeGuess::from_path(path).first().map(|m| m.to_string())
    }

    /// Detects the MIME type from the leading bytes of a file.
    pub fn sniff(bytes: &[u8]) -> Option<String> {
        infer::get(bytes).map(|kind| kind.mime_type().to_string())
    }
}
