//! Album repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::foundation::{AlbumId, UserId};
use crate::domain::provisioning::AlbumName;

/// A new album record to persist.
#[derive(Debug, Clone)]
pub struct NewAlbum {
    /// Album title chosen at checkout (or the default).
    pub name: AlbumName,

    /// The owner's identity-store user id.
    pub created_by: UserId,
}

/// A persisted album.
#[derive(Debug, Clone)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Errors from the album store.
#[derive(Debug, Clone, Error)]
pub enum AlbumRepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(String),
}

/// Port for persisting albums.
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Insert a new album owned by the given user.
    async fn insert(&self, album: NewAlbum) -> Result<Album, AlbumRepositoryError>;
}
