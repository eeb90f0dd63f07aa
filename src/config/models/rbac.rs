//! RBAC configuration

use super::*;
use crate::utils::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the session store, the facade and route guards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Staleness window of the session identity
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Route a denied route guard redirects to
    #[serde(default = "default_fallback_route")]
    pub fallback_route: String,
    /// Redirect instead of rendering the access-denied view
    #[serde(default)]
    pub redirect_on_denied: bool,
    /// Emit a log event for every denied check
    #[serde(default = "default_true")]
    pub log_denials: bool,
    /// Backend endpoint returning the current identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_endpoint: Option<IdentityEndpointConfig>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            fallback_route: default_fallback_route(),
            redirect_on_denied: false,
            log_denials: true,
            identity_endpoint: None,
        }
    }
}

impl RbacConfig {
    /// Read `RBAC_*` variables, falling back to defaults for unset ones
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(ttl) = env_var("RBAC_SESSION_TTL_SECS") {
            config.session_ttl_secs = ttl.parse().map_err(|_| {
                RbacError::config(format!("RBAC_SESSION_TTL_SECS is not a number: {}", ttl))
            })?;
        }
        if let Some(route) = env_var("RBAC_FALLBACK_ROUTE") {
            config.fallback_route = route;
        }
        if let Some(flag) = env_var("RBAC_REDIRECT_ON_DENIED") {
            config.redirect_on_denied = parse_flag("RBAC_REDIRECT_ON_DENIED", &flag)?;
        }
        if let Some(flag) = env_var("RBAC_LOG_DENIALS") {
            config.log_denials = parse_flag("RBAC_LOG_DENIALS", &flag)?;
        }
        if let Some(base_url) = env_var("RBAC_IDENTITY_BASE_URL") {
            config.identity_endpoint = Some(IdentityEndpointConfig::new(base_url));
        }

        Ok(config)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Merge RBAC configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        if other.session_ttl_secs != default_session_ttl() {
            self.session_ttl_secs = other.session_ttl_secs;
        }
        if other.fallback_route != default_fallback_route() {
            self.fallback_route = other.fallback_route;
        }
        if other.redirect_on_denied {
            self.redirect_on_denied = true;
        }
        if !other.log_denials {
            self.log_denials = false;
        }
        if other.identity_endpoint.is_some() {
            self.identity_endpoint = other.identity_endpoint;
        }
        self
    }
}

/// Location of the identity endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEndpointConfig {
    pub base_url: String,
    #[serde(default = "default_identity_path")]
    pub path: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl IdentityEndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: default_identity_path(),
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Full endpoint URL
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(RbacError::config(format!(
            "{} must be a boolean, got: {}",
            key, other
        ))),
    }
}
