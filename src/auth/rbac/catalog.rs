//! Permission catalog: resources, actions and the per-role grant tables
//!
//! # Key invariants
//! - A permission is a typed `(Resource, Action)` pair; its wire form is
//!   `"resource:action"` and [`Permission::token`] is total.
//! - The four grant tiers are disjoint. A role holds its own tier plus every
//!   lower tier, so each role's set is a superset of the next role down.
//! - The catalog is a client-side mirror used for enumeration and fallbacks;
//!   authorization decisions use the server-asserted list held by the session.

use super::evaluator::PermissionSet;
use super::roles::Role;
use crate::utils::error::RbacError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use Action as A;
use Resource as R;

/// Resource category a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Products,
    Orders,
    Team,
    Analytics,
    Settings,
    Billing,
    Customers,
    Promotions,
    Reviews,
    Notifications,
    Reports,
    Inventory,
    Categories,
    Profile,
    Logs,
    Api,
}

impl Resource {
    pub const ALL: [Resource; 16] = [
        Resource::Products,
        Resource::Orders,
        Resource::Team,
        Resource::Analytics,
        Resource::Settings,
        Resource::Billing,
        Resource::Customers,
        Resource::Promotions,
        Resource::Reviews,
        Resource::Notifications,
        Resource::Reports,
        Resource::Inventory,
        Resource::Categories,
        Resource::Profile,
        Resource::Logs,
        Resource::Api,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Products => "products",
            Resource::Orders => "orders",
            Resource::Team => "team",
            Resource::Analytics => "analytics",
            Resource::Settings => "settings",
            Resource::Billing => "billing",
            Resource::Customers => "customers",
            Resource::Promotions => "promotions",
            Resource::Reviews => "reviews",
            Resource::Notifications => "notifications",
            Resource::Reports => "reports",
            Resource::Inventory => "inventory",
            Resource::Categories => "categories",
            Resource::Profile => "profile",
            Resource::Logs => "logs",
            Resource::Api => "api",
        }
    }

    /// Noun used in denial messages ("refund orders", "manage API keys")
    pub fn noun(self) -> &'static str {
        match self {
            Resource::Team => "team members",
            Resource::Settings => "store settings",
            Resource::Profile => "your profile",
            Resource::Logs => "audit logs",
            Resource::Api => "the API",
            other => other.as_str(),
        }
    }

    /// Category heading for grouped listings
    pub fn label(self) -> &'static str {
        match self {
            Resource::Products => "Products",
            Resource::Orders => "Orders",
            Resource::Team => "Team",
            Resource::Analytics => "Analytics",
            Resource::Settings => "Settings",
            Resource::Billing => "Billing",
            Resource::Customers => "Customers",
            Resource::Promotions => "Promotions",
            Resource::Reviews => "Reviews",
            Resource::Notifications => "Notifications",
            Resource::Reports => "Reports",
            Resource::Inventory => "Inventory",
            Resource::Categories => "Categories",
            Resource::Profile => "Profile",
            Resource::Logs => "Audit Logs",
            Resource::Api => "API",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == value)
            .ok_or(())
    }
}

/// Operation a permission allows on its resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Export,
    Manage,
    Access,
    BulkImport,
    Refund,
    UpdateStatus,
    Cancel,
    Invite,
    Remove,
    ChangeRole,
    Respond,
    ManageKeys,
}

impl Action {
    pub const ALL: [Action; 16] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Export,
        Action::Manage,
        Action::Access,
        Action::BulkImport,
        Action::Refund,
        Action::UpdateStatus,
        Action::Cancel,
        Action::Invite,
        Action::Remove,
        Action::ChangeRole,
        Action::Respond,
        Action::ManageKeys,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Manage => "manage",
            Action::Access => "access",
            Action::BulkImport => "bulk_import",
            Action::Refund => "refund",
            Action::UpdateStatus => "update_status",
            Action::Cancel => "cancel",
            Action::Invite => "invite",
            Action::Remove => "remove",
            Action::ChangeRole => "change_role",
            Action::Respond => "respond",
            Action::ManageKeys => "manage_keys",
        }
    }

    /// Verb phrase used in denial messages
    pub fn verb(self) -> &'static str {
        match self {
            Action::BulkImport => "bulk import",
            Action::UpdateStatus => "update the status of",
            Action::ChangeRole => "change the role of",
            Action::Respond => "respond to",
            Action::ManageKeys => "manage keys for",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or(())
    }
}

/// A `resource:action` capability.
///
/// Serialized as its wire token, so identity payloads stay plain string lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// Render the wire token `"resource:action"`
    pub fn token(&self) -> String {
        format!("{}:{}", self.resource.as_str(), self.action.as_str())
    }

    /// Parse a wire token.
    ///
    /// # Errors
    /// - [`RbacError::InvalidPermission`] when the token has no `:`, names a
    ///   resource or action that does not exist, or pairs them in a way no
    ///   grant tier defines (`orders:manage_keys`).
    pub fn parse(token: &str) -> Result<Self, RbacError> {
        let (resource, action) = token
            .split_once(':')
            .ok_or_else(|| RbacError::invalid_permission(token))?;
        let resource =
            Resource::from_str(resource).map_err(|_| RbacError::invalid_permission(token))?;
        let action = Action::from_str(action).map_err(|_| RbacError::invalid_permission(token))?;
        let permission = Self::new(resource, action);
        if !is_cataloged(permission) {
            return Err(RbacError::invalid_permission(token));
        }
        Ok(permission)
    }

    /// Sentence fragment such as "refund orders"
    pub fn describe(&self) -> String {
        format!("{} {}", self.action.verb(), self.resource.noun())
    }

    /// Whether this permission is flagged financial, destructive or security-relevant
    pub fn is_sensitive(&self) -> bool {
        is_sensitive(*self)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Permission::parse(value)
    }
}

impl TryFrom<String> for Permission {
    type Error = RbacError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Permission::parse(&value)
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.token()
    }
}

const fn p(resource: Resource, action: Action) -> Permission {
    Permission::new(resource, action)
}

/// Granted to every role
pub const STAFF_GRANTS: &[Permission] = &[
    p(R::Products, A::View),
    p(R::Orders, A::View),
    p(R::Orders, A::UpdateStatus),
    p(R::Customers, A::View),
    p(R::Inventory, A::View),
    p(R::Categories, A::View),
    p(R::Reviews, A::View),
    p(R::Notifications, A::View),
    p(R::Profile, A::View),
    p(R::Profile, A::Edit),
];

/// Added at manager level
pub const MANAGER_GRANTS: &[Permission] = &[
    p(R::Products, A::Create),
    p(R::Products, A::Edit),
    p(R::Products, A::Export),
    p(R::Orders, A::Edit),
    p(R::Orders, A::Cancel),
    p(R::Orders, A::Export),
    p(R::Customers, A::Create),
    p(R::Customers, A::Edit),
    p(R::Promotions, A::View),
    p(R::Promotions, A::Create),
    p(R::Promotions, A::Edit),
    p(R::Reviews, A::Respond),
    p(R::Inventory, A::Edit),
    p(R::Categories, A::Create),
    p(R::Categories, A::Edit),
    p(R::Analytics, A::View),
    p(R::Reports, A::View),
    p(R::Team, A::View),
];

/// Added at admin level
pub const ADMIN_GRANTS: &[Permission] = &[
    p(R::Products, A::Delete),
    p(R::Products, A::BulkImport),
    p(R::Orders, A::Refund),
    p(R::Customers, A::Delete),
    p(R::Customers, A::Export),
    p(R::Promotions, A::Delete),
    p(R::Reviews, A::Delete),
    p(R::Inventory, A::Export),
    p(R::Categories, A::Delete),
    p(R::Analytics, A::Export),
    p(R::Reports, A::Create),
    p(R::Reports, A::Export),
    p(R::Team, A::Invite),
    p(R::Team, A::Edit),
    p(R::Team, A::ChangeRole),
    p(R::Settings, A::View),
    p(R::Settings, A::Edit),
    p(R::Notifications, A::Manage),
    p(R::Logs, A::View),
    p(R::Api, A::Access),
];

/// Owner only
pub const OWNER_GRANTS: &[Permission] = &[
    p(R::Team, A::Remove),
    p(R::Billing, A::View),
    p(R::Billing, A::Manage),
    p(R::Logs, A::Export),
    p(R::Api, A::ManageKeys),
];

const SENSITIVE: &[Permission] = &[
    p(R::Billing, A::Manage),
    p(R::Orders, A::Refund),
    p(R::Team, A::Remove),
    p(R::Team, A::ChangeRole),
    p(R::Api, A::ManageKeys),
    p(R::Products, A::Delete),
    p(R::Customers, A::Delete),
    p(R::Settings, A::Edit),
];

/// Grants introduced at exactly this role's tier
pub fn tier_grants(role: Role) -> &'static [Permission] {
    match role {
        Role::Staff => STAFF_GRANTS,
        Role::Manager => MANAGER_GRANTS,
        Role::Admin => ADMIN_GRANTS,
        Role::Owner => OWNER_GRANTS,
    }
}

/// Full default permission set for a role, lower tiers included
pub fn permissions_for_role(role: Role) -> PermissionSet {
    Role::ALL
        .into_iter()
        .filter(|tier| role.includes(*tier))
        .flat_map(|tier| tier_grants(tier).iter().copied())
        .collect()
}

/// Every permission in the catalog, sorted by resource then action
pub fn all_permissions() -> Vec<Permission> {
    let mut all: Vec<Permission> = Role::ALL
        .into_iter()
        .flat_map(|tier| tier_grants(tier).iter().copied())
        .collect();
    all.sort();
    all
}

/// Whether some grant tier defines this permission
pub fn is_cataloged(permission: Permission) -> bool {
    Role::ALL
        .into_iter()
        .any(|tier| tier_grants(tier).contains(&permission))
}

/// Whether a permission is flagged financial, destructive or security-relevant
pub fn is_sensitive(permission: Permission) -> bool {
    SENSITIVE.contains(&permission)
}

/// Numeric hierarchy level of a role
pub fn hierarchy_level(role: Role) -> u8 {
    role.hierarchy_level()
}

/// A role's default permissions grouped by resource category
pub fn categories_of(role: Role) -> BTreeMap<Resource, Vec<Permission>> {
    permissions_for_role(role).by_category()
}

/// The whole catalog grouped by resource category
pub fn all_categories() -> BTreeMap<Resource, Vec<Permission>> {
    let mut categories: BTreeMap<Resource, Vec<Permission>> = BTreeMap::new();
    for permission in all_permissions() {
        categories
            .entry(permission.resource)
            .or_default()
            .push(permission);
    }
    categories
}
