//! Configuration management for the RBAC core
//!
//! Settings come from a YAML file or from `RBAC_*` environment variables and
//! are validated before use.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Root configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// RBAC settings
    #[serde(default)]
    pub rbac: RbacConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Read failures surface as [`RbacError::Io`], syntax errors as
    /// [`RbacError::Yaml`] and rejected values as [`RbacError::Config`].
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            rbac: RbacConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn rbac(&self) -> &RbacConfig {
        &self.rbac
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.rbac
            .validate()
            .map_err(|e| RbacError::Config(format!("RBAC config error: {}", e)))?;

        if let Some(endpoint) = &self.rbac.identity_endpoint {
            endpoint
                .validate()
                .map_err(|e| RbacError::Config(format!("Identity endpoint error: {}", e)))?;
        }

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.rbac = self.rbac.merge(other.rbac);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
