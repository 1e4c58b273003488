//! PostgreSQL adapters for the persistence ports.

mod album_repository;
mod processed_session_store;

pub use album_repository::PostgresAlbumRepository;
pub use processed_session_store::PostgresProcessedSessionStore;
