//! Provisioning domain - the payment-to-account workflow.
//!
//! Covers webhook signature verification, the Stripe event model, the album
//! name rules, the generated temporary password, and the typed errors each
//! provisioning step can fail with.

mod album_name;
mod errors;
mod password;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use album_name::{AlbumName, DEFAULT_ALBUM_NAME};
pub use errors::ProvisioningError;
pub use password::TemporaryPassword;
pub use stripe_event::{CheckoutSessionObject, StripeEvent, StripeEventData, StripeEventType};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier};

#[cfg(test)]
pub use stripe_event::StripeEventBuilder;
#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
