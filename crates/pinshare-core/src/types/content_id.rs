//! Content identifiers.
//!
//! A content identifier is an opaque token produced by the content-addressed
//! network. It is never checked against a hashing scheme here; the only
//! check is a loose plausibility test used to keep obviously broken values
//! away from gateway URLs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque content identifier (e.g. an IPFS CID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Wrap a raw identifier. No validation is performed.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Loose shape check: non-empty, at least `min_len` characters, and
    /// free of whitespace and URL delimiters.
    pub fn is_plausible(&self, min_len: usize) -> bool {
        let raw = self.0.as_str();
        !raw.is_empty()
            && raw.chars().count() >= min_len
            && !raw
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '&'))
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ContentId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
