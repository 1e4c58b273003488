//! Ports - trait interfaces for external collaborators.
//!
//! Adapters implement these; application handlers depend only on the traits,
//! so every external service can be substituted with a fake in tests.

mod album_repository;
mod identity_provider;
mod payment_gateway;
mod processed_session_store;

pub use album_repository::{Album, AlbumRepository, AlbumRepositoryError, NewAlbum};
pub use identity_provider::{
    CreateUserRequest, CreatedUser, IdentityError, IdentityProvider, UserRole,
};
pub use payment_gateway::{
    CreateCheckoutSession, GatewayCheckoutSession, GatewayError, PaymentGateway,
};
pub use processed_session_store::{LedgerError, ProcessedSessionStore};
