//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors that occur constructing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier cannot be empty")]
    Empty,
}

/// Identifier of a user account in the identity store.
///
/// The identity provider issues these, so they are opaque strings rather
/// than locally generated UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId from a provider-issued identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an album record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(Uuid);

impl AlbumId {
    /// Creates a new random AlbumId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AlbumId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AlbumId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlbumId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_provider_identifiers() {
        let id = UserId::new("7f9c0e4a-1b2d-4c3e-8f5a-6d7e8f9a0b1c").unwrap();
        assert_eq!(id.as_str(), "7f9c0e4a-1b2d-4c3e-8f5a-6d7e8f9a0b1c");
    }

    #[test]
    fn user_id_rejects_empty_strings() {
        assert_eq!(UserId::new(""), Err(IdError::Empty));
        assert_eq!(UserId::new("   "), Err(IdError::Empty));
    }

    #[test]
    fn album_ids_are_unique() {
        assert_ne!(AlbumId::new(), AlbumId::new());
    }

    #[test]
    fn album_id_round_trips_through_string() {
        let id = AlbumId::new();
        let parsed: AlbumId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
