//! Wire types for the billing endpoints.
//!
//! Field names are camelCase to match the browser client.

use serde::{Deserialize, Serialize};

/// Request body for POST /api/checkout.
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Album title typed by the purchaser; absent or blank gets the default.
    #[serde(default, rename = "albumName")]
    pub album_name: Option<String>,
}

/// Response body for a created checkout session.
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Gateway session id the client redirects to checkout with.
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Hosted checkout URL, when the gateway returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Acknowledgement body for a handled webhook delivery.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Generic JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
