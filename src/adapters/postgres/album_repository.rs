//! PostgreSQL implementation of AlbumRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AlbumId, UserId};
use crate::ports::{Album, AlbumRepository, AlbumRepositoryError, NewAlbum};

/// PostgreSQL implementation of the AlbumRepository port.
pub struct PostgresAlbumRepository {
    pool: PgPool,
}

impl PostgresAlbumRepository {
    /// Creates a new repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an album.
#[derive(Debug, sqlx::FromRow)]
struct AlbumRow {
    id: Uuid,
    name: String,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<AlbumRow> for Album {
    type Error = AlbumRepositoryError;

    fn try_from(row: AlbumRow) -> Result<Self, Self::Error> {
        let created_by = UserId::new(row.created_by.to_string())
            .map_err(|e| AlbumRepositoryError::Database(format!("invalid created_by: {}", e)))?;

        Ok(Album {
            id: AlbumId::from_uuid(row.id),
            name: row.name,
            created_by,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AlbumRepository for PostgresAlbumRepository {
    async fn insert(&self, album: NewAlbum) -> Result<Album, AlbumRepositoryError> {
        // Owner ids come from the identity store as UUID strings
        let created_by = Uuid::parse_str(album.created_by.as_str())
            .map_err(|e| AlbumRepositoryError::Database(format!("invalid owner id: {}", e)))?;

        let row: AlbumRow = sqlx::query_as(
            r#"
            INSERT INTO albums (id, name, created_by, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, name, created_by, created_at
            "#,
        )
        .bind(AlbumId::new().as_uuid())
        .bind(album.name.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AlbumRepositoryError::Database(e.to_string()))?;

        row.try_into()
    }
}
