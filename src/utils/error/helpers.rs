//! Helper functions for creating specific error types

use super::types::RbacError;

impl RbacError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn identity_fetch<S: Into<String>>(message: S) -> Self {
        Self::IdentityFetch(message.into())
    }

    pub fn invalid_permission<S: Into<String>>(token: S) -> Self {
        Self::InvalidPermission(token.into())
    }

    pub fn invalid_role<S: Into<String>>(role: S) -> Self {
        Self::InvalidRole(role.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Whether a later refetch could succeed without a code or config change
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::IdentityFetch(_) | Self::Http(_) | Self::Io(_))
    }
}
