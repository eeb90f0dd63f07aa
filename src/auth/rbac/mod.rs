//! Role-Based Access Control (RBAC) core
//!
//! Leaf-first: [`catalog`] and [`roles`] hold static data, [`evaluator`]
//! answers membership queries, and [`RbacFacade`] combines them with the
//! session identity into the queries screens and guards consume.

pub mod catalog;
mod evaluator;
mod facade;
pub mod roles;
mod types;
mod visibility;

pub use catalog::{
    Action, Permission, Resource, all_categories, all_permissions, categories_of,
    hierarchy_level, is_cataloged, is_sensitive, permissions_for_role,
};
pub use evaluator::{
    PermissionSet, group_by_category, has, has_all, has_any, role_has, role_has_all,
    role_has_any, sensitive_in,
};
pub use facade::{
    AuthorizeOptions, IdentitySource, RbacFacade, StaticIdentity, TEAM_CHANGE_ROLE,
};
pub use roles::Role;
pub use types::{AuthorizationResult, CurrentUserIdentity, IdentityPayload, LOADING_REASON};
pub use visibility::UiVisibility;
