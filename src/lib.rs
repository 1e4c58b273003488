//! SnapAlbum - Event Photo Album Backend
//!
//! Organizers buy a shared photo album through a one-time Stripe checkout;
//! the completed-payment webhook then drives idempotent provisioning of the
//! purchaser's account, album record, and credential-setup email.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
