//! Album display name rules.

use std::fmt;

/// Name used when the purchaser left the album name blank at checkout.
pub const DEFAULT_ALBUM_NAME: &str = "My Photo Album";

/// Display name of an album, with the blank-input default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumName(String);

impl AlbumName {
    /// Builds an album name from checkout metadata.
    ///
    /// Absent or blank metadata falls back to [`DEFAULT_ALBUM_NAME`];
    /// anything else is kept verbatim.
    pub fn from_metadata(name: Option<&str>) -> Self {
        match name {
            Some(n) if !n.trim().is_empty() => Self(n.to_string()),
            _ => Self(DEFAULT_ALBUM_NAME.to_string()),
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AlbumName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
