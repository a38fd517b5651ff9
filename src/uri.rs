//! Locator parsing
//!
//! Only enough of RFC 3986 to pick a backend by scheme and to find the final
//! path segment. Everything else is left to the backend.

use std::fmt;
use std::path::PathBuf;

use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    raw: String,
    scheme: String,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Uri {
    /// Parses a locator. Strings without `://` are treated as local paths.
    pub fn parse(input: &str) -> Self {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (input, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (rest, None),
        };

        let (scheme, authority, path) = match rest.split_once("://") {
            Some((scheme, after)) => match after.find('/') {
                Some(idx) => (scheme, &after[..idx], &after[idx..]),
                None => (scheme, after, ""),
            },
            None => ("file", "", rest),
        };

        Self {
            raw: input.to_string(),
            scheme: scheme.to_ascii_lowercase(),
            authority: (!authority.is_empty()).then(|| authority.to_string()),
            path: path.to_string(),
            query,
            fragment,
        }
    }

    /// The locator exactly as the caller passed it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// The still-encoded path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Decoded, non-empty path segments.
    pub fn path_segments(&self) -> Vec<String> {
        self.path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode)
            .collect()
    }

    pub fn last_path_segment(&self) -> Option<String> {
        self.path
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .map(decode)
    }

    /// Local filesystem path for `file` URIs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.scheme != "file" || self.path.is_empty() {
            return None;
        }
        Some(PathBuf::from(decode(&self.path)))
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
