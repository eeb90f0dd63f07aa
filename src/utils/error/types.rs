//! Error types for the RBAC core

use thiserror::Error;

/// Result type alias for the RBAC core
pub type Result<T> = std::result::Result<T, RbacError>;

/// Main error type for the RBAC core
#[derive(Error, Debug)]
pub enum RbacError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity collaborator failed to produce a role and permission list
    #[error("Identity fetch failed: {0}")]
    IdentityFetch(String),

    /// Token is not a `resource:action` pair from the catalog
    #[error("Invalid permission: {0}")]
    InvalidPermission(String),

    /// Role name outside `owner|admin|manager|staff`
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}
