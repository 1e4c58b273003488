//! CreateCheckoutSessionHandler - Command handler for opening a checkout session.

use std::sync::Arc;

use crate::ports::{CreateCheckoutSession, GatewayError, PaymentGateway};

/// Command to open a hosted checkout session for the album package.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    /// Album title the purchaser typed, if any. Passed through to checkout
    /// metadata verbatim; the blank-input default applies at provisioning.
    pub album_name: Option<String>,

    /// Origin of the requesting site, used to build the redirect URLs.
    pub origin: String,
}

/// Result of opening a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionResult {
    /// Gateway-issued session id for the client to redirect with.
    pub session_id: String,

    /// Hosted checkout URL, when the gateway returns one.
    pub url: Option<String>,
}

/// Handler for opening checkout sessions.
///
/// Builds the post-payment redirect URLs from the request origin and
/// delegates session creation to the gateway. The album name travels
/// through checkout metadata exactly as entered so the webhook side sees
/// the purchaser's input, not an early default.
pub struct CreateCheckoutSessionHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateCheckoutSessionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResult, GatewayError> {
        let album_name = cmd.album_name.unwrap_or_default();

        let origin = cmd.origin.trim_end_matches('/');
        // {CHECKOUT_SESSION_ID} is a gateway-side template the gateway
        // substitutes on redirect; it is passed through literally.
        let success_url = format!("{origin}/payment/success?session_id={{CHECKOUT_SESSION_ID}}");
        let cancel_url = format!("{origin}/");

        let session = self
            .gateway
            .create_checkout_session(CreateCheckoutSession {
                album_name,
                success_url,
                cancel_url,
            })
            .await?;

        tracing::info!(session_id = %session.id, "checkout session created");

        Ok(CreateCheckoutSessionResult {
            session_id: session.id,
            url: session.url,
        })
    }
}
