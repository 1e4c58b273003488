//! Axum router configuration for the billing endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_checkout, method_not_allowed, stripe_webhook, BillingAppState};

/// Create the checkout router.
///
/// # Routes
/// - `POST /checkout` - Open a hosted checkout session
pub fn checkout_routes() -> Router<BillingAppState> {
    Router::new().route(
        "/checkout",
        post(create_checkout).fallback(method_not_allowed),
    )
}

/// Create the payment webhook router.
///
/// Separate from the checkout routes because webhook requests are
/// authenticated by signature rather than by user session.
///
/// # Routes
/// - `POST /stripe` - Handle Stripe payment notifications
pub fn webhook_routes() -> Router<BillingAppState> {
    Router::new().route("/stripe", post(stripe_webhook).fallback(method_not_allowed))
}

/// Create the complete billing router, suitable for mounting at `/api`.
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .merge(checkout_routes())
        .nest("/webhooks", webhook_routes())
}
