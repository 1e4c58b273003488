//! Supabase configuration
//!
//! The identity store and credential-setup email delivery are hosted by
//! Supabase Auth (GoTrue). The service-role key authorizes the admin API.

use serde::Deserialize;

use super::error::ValidationError;

/// Supabase project configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g. https://abcdefgh.supabase.co)
    pub project_url: String,

    /// Service-role API key (server-side only, never exposed to clients)
    pub service_role_key: String,
}

impl SupabaseConfig {
    /// Validate Supabase configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_url.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_PROJECT_URL"));
        }
        if !self.project_url.starts_with("http://") && !self.project_url.starts_with("https://") {
            return Err(ValidationError::InvalidSupabaseUrl);
        }
        if self.service_role_key.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_SERVICE_ROLE_KEY"));
        }
        Ok(())
    }
}
