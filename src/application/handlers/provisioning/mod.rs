//! Payment-notification and account-provisioning handlers.

mod handle_payment_webhook;
mod provision_account;

pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use provision_account::{
    ProvisionAccountCommand, ProvisionAccountHandler, ProvisionAccountResult,
};
