//! Typed errors for the provisioning steps.

use thiserror::Error;

/// A provisioning-step failure.
///
/// Each variant corresponds to one step of the workflow. Steps are not
/// transactional: a later failure does not roll back earlier side effects,
/// and the gateway's redelivery re-runs the whole sequence.
#[derive(Debug, Clone, Error)]
pub enum ProvisioningError {
    /// The identity store rejected account creation (duplicate email or
    /// other rejection).
    #[error("identity creation failed: {0}")]
    IdentityCreation(String),

    /// The album record could not be inserted.
    #[error("album creation failed: {0}")]
    AlbumCreation(String),

    /// The credential-setup email could not be dispatched.
    #[error("credential-setup email dispatch failed: {0}")]
    NotificationDispatch(String),

    /// The processed-session ledger could not be read or written.
    #[error("processed-session ledger failure: {0}")]
    Ledger(String),
}

impl ProvisioningError {
    /// Short step name for log fields.
    pub fn step(&self) -> &'static str {
        match self {
            ProvisioningError::IdentityCreation(_) => "identity_creation",
            ProvisioningError::AlbumCreation(_) => "album_creation",
            ProvisioningError::NotificationDispatch(_) => "notification_dispatch",
            ProvisioningError::Ledger(_) => "ledger",
        }
    }
}
