//! Stripe implementation of the PaymentGateway port.
//!
//! Talks to the Stripe REST API with form-encoded requests. The album is a
//! fixed single-product purchase priced inline with `price_data`, so no
//! catalog objects need to exist in the Stripe account.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CreateCheckoutSession, GatewayCheckoutSession, GatewayError, PaymentGateway,
};

/// Product name shown on the hosted checkout page.
const PRODUCT_NAME: &str = "Photo Album Package";

/// Product description shown on the hosted checkout page.
const PRODUCT_DESCRIPTION: &str = "Create and share your photo album";

/// Stripe gateway configuration.
#[derive(Clone)]
pub struct StripeGatewayConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Album price in the smallest currency unit.
    price_cents: u32,

    /// ISO currency code.
    currency: String,

    /// Base URL for the Stripe API.
    api_base_url: String,
}

impl StripeGatewayConfig {
    pub fn new(api_key: impl Into<String>, price_cents: u32, currency: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            price_cents,
            currency: currency.into(),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe implementation of the PaymentGateway port.
pub struct StripeGateway {
    config: StripeGatewayConfig,
    http_client: reqwest::Client,
}

/// Successful response from POST /v1/checkout/sessions.
#[derive(Debug, Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: Option<String>,
}

/// Stripe error envelope.
#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(config: StripeGatewayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Builds the form-encoded body for a checkout session request.
    fn checkout_form_params(&self, request: &CreateCheckoutSession) -> Vec<(String, String)> {
        vec![
            ("mode".to_string(), "payment".to_string()),
            (
                "payment_method_types[0]".to_string(),
                "card".to_string(),
            ),
            (
                "line_items[0][price_data][currency]".to_string(),
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                PRODUCT_NAME.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][description]".to_string(),
                PRODUCT_DESCRIPTION.to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                self.config.price_cents.to_string(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
            (
                "metadata[albumName]".to_string(),
                request.album_name.clone(),
            ),
        ]
    }

    /// Extracts a readable message from a Stripe error body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<StripeErrorResponse>(body)
            .ok()
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutSession,
    ) -> Result<GatewayCheckoutSession, GatewayError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = self.checkout_form_params(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = Self::error_message(&body);
            tracing::warn!(%status, %message, "checkout session creation rejected");
            return Err(GatewayError::Provider(message));
        }

        let session: CheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Provider(format!("unexpected response: {}", e)))?;

        Ok(GatewayCheckoutSession {
            id: session.id,
            url: session.url,
        })
    }
}
