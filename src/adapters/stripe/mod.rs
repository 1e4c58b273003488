//! Stripe adapter for the payment gateway port.

mod gateway;

pub use gateway::{StripeGateway, StripeGatewayConfig};
