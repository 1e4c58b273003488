//! Payment gateway port.
//!
//! Contract for creating hosted checkout sessions (Stripe in production).

use async_trait::async_trait;
use thiserror::Error;

/// Request to open a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSession {
    /// Album title exactly as the purchaser entered it, possibly empty.
    /// Carried through checkout metadata to the webhook untouched; the
    /// blank-input default is applied during provisioning, not here.
    pub album_name: String,

    /// Where the gateway redirects after a completed payment.
    pub success_url: String,

    /// Where the gateway redirects if the buyer abandons checkout.
    pub cancel_url: String,
}

/// A checkout session issued by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayCheckoutSession {
    /// Gateway-issued session id, later echoed in the payment webhook.
    pub id: String,

    /// Hosted checkout page URL, when the gateway returns one.
    pub url: Option<String>,
}

/// Errors from the payment gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The gateway could not be reached.
    #[error("payment gateway unreachable: {0}")]
    Network(String),

    /// The gateway returned an error response.
    #[error("payment gateway error: {0}")]
    Provider(String),
}

/// Port for the hosted payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout session for the single album product.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutSession,
    ) -> Result<GatewayCheckoutSession, GatewayError>;
}
