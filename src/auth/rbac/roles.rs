//! Merchant roles and the role hierarchy

use crate::utils::error::RbacError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Merchant team role.
///
/// Declaration order follows the hierarchy, so the derived `Ord` agrees with
/// [`Role::hierarchy_level`]: `Staff < Manager < Admin < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Front-line staff: read access plus order status updates
    Staff,
    /// Store manager: day-to-day catalog and order administration
    Manager,
    /// Administrator: team, settings and destructive catalog operations
    Admin,
    /// Business owner: billing, API keys and member removal
    Owner,
}

impl Role {
    /// All roles, lowest privilege first
    pub const ALL: [Role; 4] = [Role::Staff, Role::Manager, Role::Admin, Role::Owner];

    /// Numeric level used for relative-privilege comparison
    pub const fn hierarchy_level(self) -> u8 {
        match self {
            Role::Owner => 4,
            Role::Admin => 3,
            Role::Manager => 2,
            Role::Staff => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }

    /// Human-readable label for role pickers
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Staff => "Staff",
        }
    }

    /// True when `self` is at least as privileged as `other`
    pub fn includes(self, other: Role) -> bool {
        self.hierarchy_level() >= other.hierarchy_level()
    }

    /// Roles strictly below this one, lowest first
    pub fn lower_roles(self) -> impl Iterator<Item = Role> {
        Role::ALL
            .into_iter()
            .filter(move |role| role.hierarchy_level() < self.hierarchy_level())
    }
}

/// Level of an optional role; an unresolved identity sits below every role.
pub fn hierarchy_level(role: Option<Role>) -> u8 {
    role.map(Role::hierarchy_level).unwrap_or(0)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            _ => Err(RbacError::invalid_role(value)),
        }
    }
}
