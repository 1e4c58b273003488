//! Identity provider port.
//!
//! Contract for the hosted identity store (Supabase Auth in production).
//! Covers the two operations provisioning needs: creating an account with a
//! role claim, and triggering the credential-setup (password reset) email.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::provisioning::TemporaryPassword;

/// Role claim attached to a newly provisioned account.
///
/// Purchasers get a non-privileged admin role: they manage their own album
/// but nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Album owner - administers their own album only.
    StandardAdmin,
}

impl UserRole {
    /// The role claim value stored with the identity.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::StandardAdmin => "standard_admin",
        }
    }
}

/// Request to create a user identity.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    /// Purchaser's email address (unique in the identity store).
    pub email: String,

    /// Generated temporary password, replaced by the user via the reset link.
    pub password: TemporaryPassword,

    /// Role claim for the new account.
    pub role: UserRole,
}

/// A newly created identity.
#[derive(Debug, Clone)]
pub struct CreatedUser {
    /// Provider-issued user identifier.
    pub id: UserId,

    /// Email the account is bound to.
    pub email: String,
}

/// Errors from the identity provider.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The email address already has an account.
    #[error("email already registered")]
    EmailAlreadyRegistered,

    /// The identity store rejected the request for another reason.
    #[error("identity store rejected the request: {0}")]
    Rejected(String),

    /// The identity store could not be reached.
    #[error("identity store unreachable: {0}")]
    Unreachable(String),
}

/// Port for the hosted identity store.
///
/// # Contract
///
/// Implementations must:
/// - Enforce email uniqueness, returning `EmailAlreadyRegistered` on conflict
/// - Never log or echo back the password value
/// - Treat `send_password_reset` as fire-and-forget dispatch; delivery is the
///   provider's concern
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a user identity bound to an email, password, and role claim.
    async fn create_user(&self, request: CreateUserRequest)
        -> Result<CreatedUser, IdentityError>;

    /// Trigger a credential-setup email.
    ///
    /// `redirect_to` is where the user lands after choosing a password.
    async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), IdentityError>;
}
