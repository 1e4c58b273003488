//! HandlePaymentWebhookHandler - Command handler for payment gateway webhooks.

use std::sync::Arc;

use crate::domain::provisioning::{
    AlbumName, CheckoutSessionObject, StripeEventType, StripeWebhookVerifier, WebhookError,
};

use super::{ProvisionAccountCommand, ProvisionAccountHandler, ProvisionAccountResult};

/// Command to handle a payment webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// Webhook signature header.
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone)]
pub enum HandlePaymentWebhookResult {
    /// Completed checkout: a fresh account and album were provisioned.
    AccountProvisioned {
        session_id: String,
        user_id: String,
        album_id: String,
    },
    /// Completed checkout redelivered after provisioning; nothing done.
    AlreadyProcessed { session_id: String },
    /// Authentic event of a type we take no action on.
    Acknowledged,
}

/// Handler for payment gateway webhook deliveries.
///
/// Verifies the signature over the raw bytes before trusting anything in the
/// payload, then provisions an account for completed checkout sessions. All
/// other authentic event types are acknowledged without side effects.
pub struct HandlePaymentWebhookHandler {
    verifier: StripeWebhookVerifier,
    provisioner: Arc<ProvisionAccountHandler>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(verifier: StripeWebhookVerifier, provisioner: Arc<ProvisionAccountHandler>) -> Self {
        Self {
            verifier,
            provisioner,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        // 1. Authenticate the payload before parsing anything out of it
        let event = self.verifier.verify_and_parse(&cmd.payload, &cmd.signature)?;

        // 2. Dispatch on event type
        match event.parsed_type() {
            StripeEventType::CheckoutSessionCompleted => {
                let session: CheckoutSessionObject = event
                    .deserialize_object()
                    .map_err(|e| WebhookError::ParseError(e.to_string()))?;
                self.handle_checkout_completed(&event.id, session).await
            }
            StripeEventType::Other => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "acknowledging unhandled event type"
                );
                Ok(HandlePaymentWebhookResult::Acknowledged)
            }
        }
    }

    async fn handle_checkout_completed(
        &self,
        event_id: &str,
        session: CheckoutSessionObject,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        let email = session
            .purchaser_email()
            .ok_or(WebhookError::MissingField("customer_details.email"))?
            .to_string();

        let album_name = AlbumName::from_metadata(session.album_name());

        tracing::info!(
            event_id = %event_id,
            session_id = %session.id,
            "processing completed checkout"
        );

        let result = self
            .provisioner
            .handle(ProvisionAccountCommand {
                session_id: session.id.clone(),
                email,
                album_name,
            })
            .await?;

        Ok(match result {
            ProvisionAccountResult::Provisioned { user_id, album_id } => {
                HandlePaymentWebhookResult::AccountProvisioned {
                    session_id: session.id,
                    user_id: user_id.to_string(),
                    album_id: album_id.to_string(),
                }
            }
            ProvisionAccountResult::AlreadyProcessed => {
                HandlePaymentWebhookResult::AlreadyProcessed {
                    session_id: session.id,
                }
            }
        })
    }
}
