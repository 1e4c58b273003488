//! Command handlers, grouped by workflow.

pub mod checkout;
pub mod provisioning;
