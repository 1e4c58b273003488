//! Supabase Auth implementation of the IdentityProvider port.
//!
//! Uses the GoTrue admin API with the service-role key. Account creation
//! marks the email confirmed so the purchaser's only remaining step is the
//! password-reset link.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::domain::foundation::UserId;
use crate::ports::{CreateUserRequest, CreatedUser, IdentityError, IdentityProvider};

/// Supabase Auth configuration.
#[derive(Clone)]
pub struct SupabaseIdentityConfig {
    /// Project base URL (https://<project>.supabase.co).
    project_url: String,

    /// Service-role key; bypasses row-level security, server-side only.
    service_role_key: SecretString,
}

impl SupabaseIdentityConfig {
    pub fn new(project_url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        let project_url = project_url.into();
        Self {
            project_url: project_url.trim_end_matches('/').to_string(),
            service_role_key: SecretString::new(service_role_key.into()),
        }
    }
}

/// Supabase Auth implementation of the IdentityProvider port.
pub struct SupabaseIdentityProvider {
    config: SupabaseIdentityConfig,
    http_client: reqwest::Client,
}

/// Successful response from the admin create-user endpoint.
#[derive(Debug, Deserialize)]
struct AdminUserResponse {
    id: String,
    email: String,
}

/// GoTrue error envelope. Field names vary across endpoints.
#[derive(Debug, Deserialize)]
struct GoTrueErrorResponse {
    #[serde(alias = "msg", alias = "error_description")]
    message: Option<String>,
    error_code: Option<String>,
}

impl SupabaseIdentityProvider {
    pub fn new(config: SupabaseIdentityConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.config.project_url, path)
    }

    /// Classifies an error response body, detecting the duplicate-email case.
    fn classify_error(status: StatusCode, body: &str) -> IdentityError {
        let parsed: Option<GoTrueErrorResponse> = serde_json::from_str(body).ok();

        let code = parsed.as_ref().and_then(|e| e.error_code.as_deref());
        let message = parsed
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| body.to_string());

        let duplicate = code == Some("email_exists")
            || status == StatusCode::UNPROCESSABLE_ENTITY
                && message.to_lowercase().contains("already")
            || message.to_lowercase().contains("already been registered");

        if duplicate {
            IdentityError::EmailAlreadyRegistered
        } else {
            IdentityError::Rejected(message)
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreatedUser, IdentityError> {
        let body = json!({
            "email": request.email,
            "password": request.password.expose(),
            "email_confirm": true,
            "user_metadata": {
                "role": request.role.as_str(),
            },
        });

        let response = self
            .http_client
            .post(self.auth_url("/admin/users"))
            .bearer_auth(self.config.service_role_key.expose_secret())
            .header("apikey", self.config.service_role_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let error = Self::classify_error(status, &body);
            tracing::warn!(%status, %error, "user creation rejected");
            return Err(error);
        }

        let user: AdminUserResponse = serde_json::from_str(&body)
            .map_err(|e| IdentityError::Rejected(format!("unexpected response: {}", e)))?;

        let id = UserId::new(user.id)
            .map_err(|e| IdentityError::Rejected(format!("invalid user id: {}", e)))?;

        Ok(CreatedUser {
            id,
            email: user.email,
        })
    }

    async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), IdentityError> {
        let body = json!({ "email": email });

        let response = self
            .http_client
            .post(self.auth_url("/recover"))
            .bearer_auth(self.config.service_role_key.expose_secret())
            .header("apikey", self.config.service_role_key.expose_secret())
            .query(&[("redirect_to", redirect_to)])
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| IdentityError::Unreachable(e.to_string()))?;
            let error = Self::classify_error(status, &body);
            tracing::warn!(%status, %error, "password reset dispatch rejected");
            return Err(error);
        }

        Ok(())
    }
}
