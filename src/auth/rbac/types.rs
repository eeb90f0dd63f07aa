//! RBAC type definitions

use super::catalog::Permission;
use super::evaluator::PermissionSet;
use super::roles::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason attached to every denial issued while the identity is still loading
pub const LOADING_REASON: &str = "Loading permissions...";

/// Outcome of an authorization query.
///
/// Denial is a normal value, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResult {
    /// Whether the query is granted
    pub authorized: bool,
    /// Human-readable reason for denial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Permission that was checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,
}

impl AuthorizationResult {
    pub fn granted(permission: Permission) -> Self {
        Self {
            authorized: true,
            reason: None,
            permission: Some(permission),
        }
    }

    pub fn denied(permission: Permission, reason: impl Into<String>) -> Self {
        Self {
            authorized: false,
            reason: Some(reason.into()),
            permission: Some(permission),
        }
    }

    /// Fail-closed result for queries issued before the identity resolves
    pub fn loading(permission: Option<Permission>) -> Self {
        Self {
            authorized: false,
            reason: Some(LOADING_REASON.to_string()),
            permission,
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.authorized && self.reason.as_deref() == Some(LOADING_REASON)
    }
}

/// Snapshot of the authenticated principal as seen by the RBAC core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUserIdentity {
    /// Role, absent until a fetch succeeds
    pub role: Option<Role>,
    /// Server-asserted permission grants
    pub permissions: PermissionSet,
    /// True until the first fetch of a session completes
    pub is_loading: bool,
    /// Last fetch failure, cleared on success
    pub error: Option<String>,
    /// When the permissions were fetched
    pub fetched_at: Option<DateTime<Utc>>,
    /// Bumped on every installed snapshot
    pub revision: u64,
}

impl CurrentUserIdentity {
    /// Identity that has not resolved yet
    pub fn loading() -> Self {
        Self {
            role: None,
            permissions: PermissionSet::new(),
            is_loading: true,
            error: None,
            fetched_at: None,
            revision: 0,
        }
    }

    /// Resolved identity with an explicit grant list
    pub fn resolved(role: Role, permissions: PermissionSet) -> Self {
        Self {
            role: Some(role),
            permissions,
            is_loading: false,
            error: None,
            fetched_at: Some(Utc::now()),
            revision: 0,
        }
    }

    /// Fail-closed identity after a fetch error: no role, no permissions
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            role: None,
            permissions: PermissionSet::new(),
            is_loading: false,
            error: Some(error.into()),
            fetched_at: None,
            revision: 0,
        }
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }
}

/// Wire shape returned by the identity endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityPayload {
    /// Authenticated user id, when the backend sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Role name
    pub role: Role,
    /// Permission tokens granted to the user
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl IdentityPayload {
    pub fn new<I, S>(role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id: None,
            role,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn into_identity(self) -> CurrentUserIdentity {
        CurrentUserIdentity::resolved(self.role, PermissionSet::from_tokens(&self.permissions))
    }
}
