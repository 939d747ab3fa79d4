use std::sync::Arc;
use std::time::Duration;

use auth::Role;
use serde::Deserialize;
use thiserror::Error;

use crate::errors::DiscoveryError;
use crate::locator::ServiceLocator;

const VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a successful authorization: the verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    pub username: String,
    pub role: Role,
}

/// Rejection reasons surfaced to the calling endpoint.
///
/// `Unauthorized` covers every non-positive outcome, including verifier
/// timeouts and transport failures; the endpoint answers 401, never 500.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthzError {
    #[error("invalid or unverifiable credential")]
    Unauthorized,

    #[error("insufficient privileges")]
    Forbidden,
}

/// Wire shape of the verifier's response.
#[derive(Debug, Deserialize)]
struct VerifyResponseBody {
    valid: bool,
    username: Option<String>,
    role: Option<Role>,
    #[allow(dead_code)]
    error: Option<String>,
}

/// Guard used by every non-auth service before honoring a request.
///
/// Locates the credential verifier through the [`ServiceLocator`] and
/// presents the caller's token for independent re-verification. One instance
/// per service; shared across handlers.
pub struct AuthClient {
    locator: Arc<dyn ServiceLocator>,
    http: reqwest::Client,
    auth_service_name: String,
}

impl AuthClient {
    pub fn new(
        locator: Arc<dyn ServiceLocator>,
        auth_service_name: impl Into<String>,
    ) -> Result<Self, DiscoveryError> {
        let http = reqwest::Client::builder().timeout(VERIFY_TIMEOUT).build()?;

        Ok(Self {
            locator,
            http,
            auth_service_name: auth_service_name.into(),
        })
    }

    /// Verify a presented token and optionally require a role.
    ///
    /// # Errors
    /// * `Unauthorized` - Empty token, verifier unreachable, non-success
    ///   response, or `valid: false`
    /// * `Forbidden` - Verified, but the role does not match `required_role`
    pub async fn authorize(
        &self,
        token: &str,
        required_role: Option<Role>,
    ) -> Result<Verified, AuthzError> {
        if token.is_empty() {
            return Err(AuthzError::Unauthorized);
        }

        let base_url = self.locator.locate(&self.auth_service_name).await;

        let response = match self
            .http
            .post(format!("{}/auth/verify", base_url))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, verifier = %base_url, "Credential verifier unreachable");
                return Err(AuthzError::Unauthorized);
            }
        };

        if !response.status().is_success() {
            return Err(AuthzError::Unauthorized);
        }

        let body: VerifyResponseBody = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Unparsable verify response");
                return Err(AuthzError::Unauthorized);
            }
        };

        if !body.valid {
            return Err(AuthzError::Unauthorized);
        }

        let verified = match (body.username, body.role) {
            (Some(username), Some(role)) => Verified { username, role },
            _ => return Err(AuthzError::Unauthorized),
        };

        if let Some(required) = required_role {
            if verified.role != required {
                return Err(AuthzError::Forbidden);
            }
        }

        Ok(verified)
    }

    /// Shorthand for endpoints that require a verified admin.
    pub async fn authorize_admin(&self, token: &str) -> Result<Verified, AuthzError> {
        self.authorize(token, Some(Role::Admin)).await
    }
}
