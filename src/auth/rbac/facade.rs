//! RBAC facade: the single integration point for authorization queries
//!
//! The facade is handed an [`IdentitySource`] at construction and reads the
//! current snapshot on every query, so answers always reflect the latest
//! installed identity. Queries never trigger fetches and never fail: while the
//! identity is loading every query is denied with `"Loading permissions..."`.

use super::catalog::{Action, Permission, Resource};
use super::evaluator;
use super::roles::{self, Role};
use super::types::{AuthorizationResult, CurrentUserIdentity};
use super::visibility::UiVisibility;
use crate::config::RbacConfig;
use crate::core::models::team::TeamMember;
use crate::utils::logging::AuthzLogger;
use parking_lot::Mutex;
use std::sync::Arc;

/// Permission required by [`RbacFacade::can_assign_role`]
pub const TEAM_CHANGE_ROLE: Permission = Permission::new(Resource::Team, Action::ChangeRole);

/// Supplier of the current identity snapshot
pub trait IdentitySource: Send + Sync {
    fn current_identity(&self) -> Arc<CurrentUserIdentity>;
}

/// Fixed identity, for tests and for hosts that manage fetching themselves
#[derive(Debug, Clone)]
pub struct StaticIdentity(Arc<CurrentUserIdentity>);

impl StaticIdentity {
    pub fn new(identity: CurrentUserIdentity) -> Self {
        Self(Arc::new(identity))
    }
}

impl IdentitySource for StaticIdentity {
    fn current_identity(&self) -> Arc<CurrentUserIdentity> {
        Arc::clone(&self.0)
    }
}

/// Options for [`RbacFacade::authorize`]
#[derive(Default)]
pub struct AuthorizeOptions<'a> {
    /// Require every listed permission instead of any one
    pub require_all: bool,
    /// Minimum role, checked before permissions
    pub min_role: Option<Role>,
    /// Called once when the request is denied
    pub on_unauthorized: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> AuthorizeOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_all(mut self) -> Self {
        self.require_all = true;
        self
    }

    pub fn min_role(mut self, role: Role) -> Self {
        self.min_role = Some(role);
        self
    }

    pub fn on_unauthorized(mut self, callback: impl FnOnce() + 'a) -> Self {
        self.on_unauthorized = Some(Box::new(callback));
        self
    }
}

/// Fail-closed membership check against a snapshot
pub(crate) fn permits(identity: &CurrentUserIdentity, permission: Permission) -> bool {
    !identity.is_loading && evaluator::has(&identity.permissions, permission)
}

fn same_grants(a: &Arc<CurrentUserIdentity>, b: &Arc<CurrentUserIdentity>) -> bool {
    Arc::ptr_eq(a, b)
        || (a.is_loading == b.is_loading && a.role == b.role && a.permissions == b.permissions)
}

/// Authorization facade over an injected identity source
pub struct RbacFacade {
    source: Arc<dyn IdentitySource>,
    log_denials: bool,
    /// Flags together with the snapshot they were computed from
    visibility: Mutex<Option<(Arc<CurrentUserIdentity>, UiVisibility)>>,
}

impl RbacFacade {
    pub fn new(source: Arc<dyn IdentitySource>) -> Self {
        Self {
            source,
            log_denials: true,
            visibility: Mutex::new(None),
        }
    }

    pub fn with_config(source: Arc<dyn IdentitySource>, config: &RbacConfig) -> Self {
        Self {
            log_denials: config.log_denials,
            ..Self::new(source)
        }
    }

    pub fn set_log_denials(&mut self, enabled: bool) {
        self.log_denials = enabled;
    }

    fn log_role_decision(
        &self,
        operation: &str,
        identity: &CurrentUserIdentity,
        target: Role,
        allowed: bool,
    ) {
        if self.log_denials && !allowed {
            AuthzLogger::log_role_decision(
                operation,
                identity.role.map(Role::as_str),
                target.as_str(),
                false,
            );
        }
    }

    /// Facade over a fixed identity
    pub fn from_identity(identity: CurrentUserIdentity) -> Self {
        Self::new(Arc::new(StaticIdentity::new(identity)))
    }

    /// Snapshot current at call time
    pub fn identity(&self) -> Arc<CurrentUserIdentity> {
        self.source.current_identity()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().role
    }

    pub fn is_loading(&self) -> bool {
        self.identity().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.identity().error.clone()
    }

    /// Detailed single-permission check
    pub fn check_permission(&self, permission: Permission) -> AuthorizationResult {
        let identity = self.identity();
        let result = if identity.is_loading {
            AuthorizationResult::loading(Some(permission))
        } else if evaluator::has(&identity.permissions, permission) {
            AuthorizationResult::granted(permission)
        } else {
            AuthorizationResult::denied(
                permission,
                format!("You don't have permission to {}", permission.describe()),
            )
        };

        if self.log_denials && !result.authorized {
            AuthzLogger::log_decision(
                identity.role.map(Role::as_str),
                &permission.token(),
                false,
                result.reason.as_deref(),
            );
        }
        result
    }

    /// Check `resource:action` for the current identity
    pub fn can_perform_action(&self, action: Action, resource: Resource) -> AuthorizationResult {
        self.check_permission(Permission::new(resource, action))
    }

    pub fn can_view(&self, resource: Resource) -> bool {
        self.can_perform_action(Action::View, resource).authorized
    }

    pub fn can_create(&self, resource: Resource) -> bool {
        self.can_perform_action(Action::Create, resource).authorized
    }

    pub fn can_edit(&self, resource: Resource) -> bool {
        self.can_perform_action(Action::Edit, resource).authorized
    }

    pub fn can_delete(&self, resource: Resource) -> bool {
        self.can_perform_action(Action::Delete, resource).authorized
    }

    pub fn can_export(&self, resource: Resource) -> bool {
        self.can_perform_action(Action::Export, resource).authorized
    }

    /// True when the literal `resource:edit` or `resource:delete` token is held.
    ///
    /// Other mutating verbs (`update_status`, `bulk_import`, ...) do not count.
    pub fn can_manage(&self, resource: Resource) -> bool {
        let identity = self.identity();
        permits(&identity, Permission::new(resource, Action::Edit))
            || permits(&identity, Permission::new(resource, Action::Delete))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        permits(&self.identity(), permission)
    }

    pub fn has_any_permission(&self, required: &[Permission]) -> bool {
        let identity = self.identity();
        !identity.is_loading && evaluator::has_any(&identity.permissions, required)
    }

    pub fn has_all_permissions(&self, required: &[Permission]) -> bool {
        let identity = self.identity();
        !identity.is_loading && evaluator::has_all(&identity.permissions, required)
    }

    /// `level(current) >= level(min_role)`; false while no role is resolved
    pub fn has_role_level(&self, min_role: Role) -> bool {
        let identity = self.identity();
        !identity.is_loading && roles::hierarchy_level(identity.role) >= min_role.hierarchy_level()
    }

    pub fn can_access_feature(&self, required: &[Permission], require_all: bool) -> bool {
        if require_all {
            self.has_all_permissions(required)
        } else {
            self.has_any_permission(required)
        }
    }

    /// Whether the current role may edit a member holding `target`.
    ///
    /// Explicit role-pair table: an owner may edit anyone but another owner;
    /// every other role may edit only roles strictly below it.
    pub fn can_edit_team_member(&self, target: Role) -> bool {
        let identity = self.identity();
        if identity.is_loading {
            return false;
        }
        let allowed = match (identity.role, target) {
            (Some(Role::Owner), Role::Owner) => false,
            (Some(Role::Owner), _) => true,
            (Some(Role::Admin), Role::Manager | Role::Staff) => true,
            (Some(Role::Manager), Role::Staff) => true,
            _ => false,
        };
        self.log_role_decision("edit_member", &identity, target, allowed);
        allowed
    }

    pub fn can_edit_member(&self, member: &TeamMember) -> bool {
        self.can_edit_team_member(member.role)
    }

    /// Whether the current identity may give someone the `target` role.
    ///
    /// `owner` is never assignable. Otherwise requires `team:change_role` and a
    /// strictly higher hierarchy level than `target`.
    pub fn can_assign_role(&self, target: Role) -> bool {
        if target == Role::Owner {
            return false;
        }
        let identity = self.identity();
        let allowed = permits(&identity, TEAM_CHANGE_ROLE)
            && roles::hierarchy_level(identity.role) > target.hierarchy_level();
        self.log_role_decision("assign_role", &identity, target, allowed);
        allowed
    }

    /// Roles of members the current identity may edit, lowest first
    pub fn editable_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.can_edit_team_member(*role))
            .collect()
    }

    /// Roles the current identity may hand out, lowest first
    pub fn assignable_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.can_assign_role(*role))
            .collect()
    }

    /// Composite guard: optional minimum role, then the permission list.
    ///
    /// Returns `false` without invoking the callback while loading. On any
    /// other denial `on_unauthorized` is invoked exactly once.
    pub fn authorize(&self, required: &[Permission], options: AuthorizeOptions<'_>) -> bool {
        let AuthorizeOptions {
            require_all,
            min_role,
            on_unauthorized,
        } = options;

        if self.is_loading() {
            return false;
        }

        if let Some(min_role) = min_role {
            if !self.has_role_level(min_role) {
                if let Some(callback) = on_unauthorized {
                    callback();
                }
                return false;
            }
        }

        let granted = self.can_access_feature(required, require_all);
        if !granted {
            if let Some(callback) = on_unauthorized {
                callback();
            }
        }
        granted
    }

    /// Named UI flags, recomputed only when the role, grants or loading state
    /// of the snapshot change
    pub fn ui_visibility(&self) -> UiVisibility {
        let identity = self.identity();
        let mut cached = self.visibility.lock();
        if let Some((seen, flags)) = cached.as_ref() {
            if same_grants(seen, &identity) {
                return flags.clone();
            }
        }
        let flags = UiVisibility::compute(&identity);
        *cached = Some((identity, flags.clone()));
        flags
    }
}
