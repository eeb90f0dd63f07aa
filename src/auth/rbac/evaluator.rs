//! Permission evaluation over explicit permission sets
//!
//! `has_any` and `has_all` both deny an empty requirement list. Callers that
//! want "no requirements means allowed" must check for emptiness themselves.

use super::catalog::{self, Permission, Resource};
use super::roles::Role;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Set of granted permissions, usually the server-asserted list for a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from wire tokens.
    ///
    /// Tokens outside the catalog are dropped, including well-formed pairs no
    /// grant tier defines, so a server asserting `orders:manage_keys` grants
    /// nothing.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut permissions = HashSet::new();
        for token in tokens {
            let token = token.as_ref();
            match Permission::parse(token) {
                Ok(permission) => {
                    permissions.insert(permission);
                }
                Err(_) => debug!("Ignoring unknown permission token: {}", token),
            }
        }
        Self { permissions }
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Adds a cataloged permission; anything else is refused and returns `false`
    pub fn insert(&mut self, permission: Permission) -> bool {
        if !catalog::is_cataloged(permission) {
            debug!("Ignoring uncataloged permission: {}", permission);
            return false;
        }
        self.permissions.insert(permission)
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// Sorted wire tokens
    pub fn tokens(&self) -> Vec<String> {
        let mut sorted: Vec<Permission> = self.permissions.iter().copied().collect();
        sorted.sort();
        sorted.iter().map(Permission::token).collect()
    }

    /// Permissions grouped by resource, each group sorted by action
    pub fn by_category(&self) -> BTreeMap<Resource, Vec<Permission>> {
        let mut categories: BTreeMap<Resource, Vec<Permission>> = BTreeMap::new();
        for permission in &self.permissions {
            categories
                .entry(permission.resource)
                .or_default()
                .push(*permission);
        }
        for group in categories.values_mut() {
            group.sort();
        }
        categories
    }

    /// Granted permissions flagged as sensitive, sorted
    pub fn sensitive(&self) -> Vec<Permission> {
        let mut sensitive: Vec<Permission> = self
            .permissions
            .iter()
            .copied()
            .filter(|permission| catalog::is_sensitive(*permission))
            .collect();
        sensitive.sort();
        sensitive
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = Self::new();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::hash_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}

/// Exact membership
pub fn has(permissions: &PermissionSet, permission: Permission) -> bool {
    permissions.contains(permission)
}

/// True iff at least one required permission is held. Empty `required` denies.
pub fn has_any(permissions: &PermissionSet, required: &[Permission]) -> bool {
    if required.is_empty() {
        return false;
    }
    required.iter().any(|permission| permissions.contains(*permission))
}

/// True iff every required permission is held. Empty `required` denies.
pub fn has_all(permissions: &PermissionSet, required: &[Permission]) -> bool {
    if required.is_empty() {
        return false;
    }
    required.iter().all(|permission| permissions.contains(*permission))
}

/// Membership against a role's default catalog grants
pub fn role_has(role: Role, permission: Permission) -> bool {
    has(&catalog::permissions_for_role(role), permission)
}

pub fn role_has_any(role: Role, required: &[Permission]) -> bool {
    has_any(&catalog::permissions_for_role(role), required)
}

pub fn role_has_all(role: Role, required: &[Permission]) -> bool {
    has_all(&catalog::permissions_for_role(role), required)
}

/// Sensitive permissions among `permissions`, sorted
pub fn sensitive_in(permissions: &PermissionSet) -> Vec<Permission> {
    permissions.sensitive()
}

/// Group an explicit permission set by resource category
pub fn group_by_category(permissions: &PermissionSet) -> BTreeMap<Resource, Vec<Permission>> {
    permissions.by_category()
}
