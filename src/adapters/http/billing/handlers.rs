//! HTTP handlers for the billing endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.
//! The webhook handler works on the raw body bytes because the signature is
//! computed over the exact payload as delivered.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::checkout::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
};
use crate::application::handlers::provisioning::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, ProvisionAccountHandler,
};
use crate::domain::provisioning::{StripeWebhookVerifier, WebhookError};
use crate::ports::{AlbumRepository, IdentityProvider, PaymentGateway, ProcessedSessionStore};

use super::dto::{CreateCheckoutRequest, CreateCheckoutResponse, ErrorResponse, WebhookAck};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all billing dependencies.
///
/// Cloned per request; everything heavy is behind an Arc.
#[derive(Clone)]
pub struct BillingAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub identity: Arc<dyn IdentityProvider>,
    pub albums: Arc<dyn AlbumRepository>,
    pub ledger: Arc<dyn ProcessedSessionStore>,
    pub verifier: StripeWebhookVerifier,
    /// Where the credential-setup email sends new users.
    pub reset_redirect_url: String,
    /// Fallback origin for redirect URLs when the request has no Origin header.
    pub site_base_url: String,
}

impl BillingAppState {
    /// Create handlers on demand from the shared state.
    pub fn checkout_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.gateway.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        let provisioner = Arc::new(ProvisionAccountHandler::new(
            self.identity.clone(),
            self.albums.clone(),
            self.ledger.clone(),
            self.reset_redirect_url.clone(),
        ));
        HandlePaymentWebhookHandler::new(self.verifier.clone(), provisioner)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/checkout
///
/// Opens a hosted checkout session for the album package and returns its id.
pub async fn create_checkout(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCheckoutRequest>,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(&state.site_base_url)
        .to_string();

    let cmd = CreateCheckoutSessionCommand {
        album_name: request.album_name,
        origin,
    };

    match state.checkout_handler().handle(cmd).await {
        Ok(result) => Json(CreateCheckoutResponse {
            session_id: result.session_id,
            url: result.url,
        })
        .into_response(),
        Err(error) => {
            tracing::error!(%error, "checkout session creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error creating checkout session")),
            )
                .into_response()
        }
    }
}

/// POST /api/webhooks/stripe
///
/// Receives payment notifications. Responses steer the gateway's retries:
/// 400 for anything unverifiable (no retry), 500 for provisioning failures
/// (retry), 200 once the event is handled or acknowledged.
pub async fn stripe_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    let Some(signature) = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
    else {
        return (
            StatusCode::BAD_REQUEST,
            "Webhook Error: missing Stripe-Signature header",
        )
            .into_response();
    };

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    match state.webhook_handler().handle(cmd).await {
        Ok(_) => Json(WebhookAck { received: true }).into_response(),
        Err(error) => webhook_error_response(error),
    }
}

/// Fallback for the billing routes when the path exists but the method is
/// wrong. Keeps the error body shape consistent with the other responses.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

fn webhook_error_response(error: WebhookError) -> Response {
    let status = error.status_code();

    if status.is_server_error() {
        tracing::error!(%error, "webhook processing failed, gateway will retry");
        (
            status,
            Json(ErrorResponse::new("Error processing payment")),
        )
            .into_response()
    } else {
        tracing::warn!(%error, "webhook rejected");
        (status, format!("Webhook Error: {}", error)).into_response()
    }
}
