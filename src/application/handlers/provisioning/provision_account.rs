//! ProvisionAccountHandler - Command handler for turning a paid checkout
//! session into a live account.

use std::sync::Arc;

use crate::domain::foundation::{AlbumId, UserId};
use crate::domain::provisioning::{AlbumName, ProvisioningError, TemporaryPassword};
use crate::ports::{
    AlbumRepository, CreateUserRequest, IdentityProvider, NewAlbum, ProcessedSessionStore,
    UserRole,
};

/// Command to provision an account for a completed checkout session.
#[derive(Debug, Clone)]
pub struct ProvisionAccountCommand {
    /// Checkout session id, the idempotency key for the whole workflow.
    pub session_id: String,

    /// Purchaser's email address from the checkout form.
    pub email: String,

    /// Album title from checkout metadata, default already applied.
    pub album_name: AlbumName,
}

/// Result of provisioning.
#[derive(Debug, Clone)]
pub enum ProvisionAccountResult {
    /// Fresh session: account, album, and reset email all completed.
    Provisioned { user_id: UserId, album_id: AlbumId },

    /// The session was already in the processed ledger; nothing was done.
    AlreadyProcessed,
}

/// Handler for the provisioning workflow.
///
/// Runs the fixed sequence: ledger check, identity creation, album insert,
/// credential-setup email, ledger mark. Steps are not transactional; a
/// failure part-way through surfaces as an error so the payment gateway
/// redelivers the notification, and the leading ledger check keeps a
/// successful redelivery from provisioning twice.
pub struct ProvisionAccountHandler {
    identity: Arc<dyn IdentityProvider>,
    albums: Arc<dyn AlbumRepository>,
    ledger: Arc<dyn ProcessedSessionStore>,
    /// Where the credential-setup email sends the user to pick a password.
    reset_redirect_url: String,
}

impl ProvisionAccountHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        albums: Arc<dyn AlbumRepository>,
        ledger: Arc<dyn ProcessedSessionStore>,
        reset_redirect_url: String,
    ) -> Self {
        Self {
            identity,
            albums,
            ledger,
            reset_redirect_url,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProvisionAccountCommand,
    ) -> Result<ProvisionAccountResult, ProvisioningError> {
        // 1. Consult the ledger so redeliveries are no-ops
        let already_processed = self
            .ledger
            .contains(&cmd.session_id)
            .await
            .map_err(|e| ProvisioningError::Ledger(e.to_string()))?;

        if already_processed {
            tracing::info!(
                session_id = %cmd.session_id,
                "checkout session already provisioned, acknowledging redelivery"
            );
            return Ok(ProvisionAccountResult::AlreadyProcessed);
        }

        // 2. Create the identity with a throwaway password
        let password = TemporaryPassword::generate();
        let user = self
            .identity
            .create_user(CreateUserRequest {
                email: cmd.email.clone(),
                password,
                role: UserRole::StandardAdmin,
            })
            .await
            .map_err(|e| ProvisioningError::IdentityCreation(e.to_string()))?;

        // 3. Insert the purchased album owned by the new user
        let album = self
            .albums
            .insert(NewAlbum {
                name: cmd.album_name.clone(),
                created_by: user.id.clone(),
            })
            .await
            .map_err(|e| ProvisioningError::AlbumCreation(e.to_string()))?;

        // 4. Send the credential-setup email
        self.identity
            .send_password_reset(&cmd.email, &self.reset_redirect_url)
            .await
            .map_err(|e| ProvisioningError::NotificationDispatch(e.to_string()))?;

        // 5. Record completion in the ledger
        self.ledger
            .mark_processed(&cmd.session_id)
            .await
            .map_err(|e| ProvisioningError::Ledger(e.to_string()))?;

        tracing::info!(
            session_id = %cmd.session_id,
            user_id = %user.id,
            album_id = %album.id,
            "account provisioned"
        );

        Ok(ProvisionAccountResult::Provisioned {
            user_id: user.id,
            album_id: album.id,
        })
    }
}
