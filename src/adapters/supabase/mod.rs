//! Supabase adapter for the identity provider port.

mod identity_provider;

pub use identity_provider::{SupabaseIdentityConfig, SupabaseIdentityProvider};
