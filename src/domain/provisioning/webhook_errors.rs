//! Webhook error types for Stripe webhook handling.
//!
//! Defines all error conditions that can occur while receiving a payment
//! notification, with HTTP status code mapping and retryability semantics.

use axum::http::StatusCode;
use thiserror::Error;

use super::errors::ProvisioningError;

/// Errors that occur during webhook handling.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window (5 minutes).
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from webhook payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A provisioning step failed after the event was accepted.
    #[error("Provisioning failed: {0}")]
    Provisioning(#[from] ProvisioningError),
}

impl WebhookError {
    /// Returns true if Stripe should retry delivering this webhook.
    ///
    /// Only provisioning failures are worth a redelivery; verification and
    /// parse failures will fail identically every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Provisioning(_))
    }

    /// Maps the error to the HTTP status code the endpoint responds with.
    ///
    /// Status codes determine Stripe's retry behavior:
    /// - 4xx: rejected, no retry
    /// - 5xx: server error, will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange
            | WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            WebhookError::Provisioning(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
