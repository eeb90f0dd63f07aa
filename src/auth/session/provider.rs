//! Identity collaborators: the provider seam and its HTTP implementation

use crate::auth::rbac::IdentityPayload;
use crate::config::IdentityEndpointConfig;
use crate::utils::error::{RbacError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::time::Duration;
use tracing::debug;

/// Source of the authenticated user's role and permission list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch the current principal. Errors surface unchanged to the caller of
    /// the refresh that triggered the fetch.
    async fn fetch_identity(&self) -> Result<IdentityPayload>;
}

/// Fetches the identity from a backend `GET` endpoint returning
/// `{"role": "...", "permissions": ["resource:action", ...]}`
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    url: String,
    bearer_token: RwLock<Option<String>>,
}

impl HttpIdentityProvider {
    pub fn new(config: &IdentityEndpointConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url(),
            bearer_token: RwLock::new(None),
        })
    }

    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        self.set_bearer_token(Some(token.into()));
        self
    }

    /// Replace the token used for subsequent fetches (`None` after sign-out)
    pub fn set_bearer_token(&self, token: Option<String>) {
        *self.bearer_token.write() = token;
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn fetch_identity(&self) -> Result<IdentityPayload> {
        debug!("Fetching identity from {}", self.url);

        let mut request = self.client.get(&self.url);
        let token = self.bearer_token.read().clone();
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RbacError::identity_fetch(format!(
                "identity endpoint returned {}",
                status
            )));
        }

        let body = response.text().await?;
        let payload: IdentityPayload = serde_json::from_str(&body)?;
        debug!(
            "Fetched identity: role={}, {} permission tokens",
            payload.role,
            payload.permissions.len()
        );
        Ok(payload)
    }
}
