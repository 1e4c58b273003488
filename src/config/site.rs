//! Site configuration
//!
//! The site base URL is used to build redirect links that leave the backend:
//! the credential-setup (password reset) redirect in particular.

use serde::Deserialize;

use super::error::ValidationError;

/// Public site configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the public site (e.g. https://snapalbum.example.com)
    pub base_url: String,
}

impl SiteConfig {
    /// URL the purchaser lands on to set their password.
    pub fn reset_password_url(&self) -> String {
        format!("{}/reset-password", self.base_url.trim_end_matches('/'))
    }

    /// Validate site configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SITE_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidSiteUrl);
        }
        Ok(())
    }
}
