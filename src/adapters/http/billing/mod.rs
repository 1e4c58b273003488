//! Billing HTTP module - checkout and payment webhook endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BillingAppState;
pub use routes::billing_router;
