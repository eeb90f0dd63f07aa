//! Protection criteria shared by both guards

use crate::auth::rbac::{Action, AuthorizationResult, Permission, RbacFacade, Resource, Role};
use serde::{Deserialize, Serialize};

/// Result of evaluating [`ProtectionCriteria`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuardDecision {
    Authorized,
    Loading,
    Denied { reason: String },
}

impl GuardDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// What a guard protects with.
///
/// Selectors are mutually exclusive: when several are set, the first one in
/// the order single permission, permission list, resource+action, minimum
/// role is used and the rest are ignored. With none set the guard is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectionCriteria {
    permission: Option<Permission>,
    permissions: Option<Vec<Permission>>,
    require_all: bool,
    resource_action: Option<(Resource, Action)>,
    min_role: Option<Role>,
}

impl ProtectionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Any one of `permissions` suffices
    pub fn any_of(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self.require_all = false;
        self
    }

    /// Every one of `permissions` is required
    pub fn all_of(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self.require_all = true;
        self
    }

    pub fn resource_action(mut self, resource: Resource, action: Action) -> Self {
        self.resource_action = Some((resource, action));
        self
    }

    pub fn min_role(mut self, role: Role) -> Self {
        self.min_role = Some(role);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.permission.is_none()
            && self.permissions.is_none()
            && self.resource_action.is_none()
            && self.min_role.is_none()
    }

    pub fn decide(&self, rbac: &RbacFacade) -> GuardDecision {
        if self.is_empty() {
            return GuardDecision::Authorized;
        }
        if rbac.is_loading() {
            return GuardDecision::Loading;
        }

        if let Some(permission) = self.permission {
            return from_result(rbac.check_permission(permission));
        }

        if let Some(permissions) = &self.permissions {
            return if rbac.can_access_feature(permissions, self.require_all) {
                GuardDecision::Authorized
            } else {
                GuardDecision::Denied {
                    reason: "You don't have the required permissions".to_string(),
                }
            };
        }

        if let Some((resource, action)) = self.resource_action {
            return from_result(rbac.can_perform_action(action, resource));
        }

        match self.min_role {
            Some(min_role) if !rbac.has_role_level(min_role) => GuardDecision::Denied {
                reason: format!("Requires {} role or higher", min_role.display_name()),
            },
            _ => GuardDecision::Authorized,
        }
    }
}

fn from_result(result: AuthorizationResult) -> GuardDecision {
    if result.authorized {
        GuardDecision::Authorized
    } else {
        GuardDecision::Denied {
            reason: result
                .reason
                .unwrap_or_else(|| "Access denied".to_string()),
        }
    }
}
