//! Shared value objects used across the domain.

mod ids;

pub use ids::{AlbumId, IdError, UserId};
