//! Authorization system
//!
//! [`session`] owns the current identity, [`rbac`] answers permission and
//! role queries against it, and [`guards`] turn those answers into what a
//! screen or control should render.

pub mod guards;
pub mod rbac;
pub mod session;

// Re-export commonly used types
pub use guards::{
    ActionGuard, ActionOutcome, GuardDecision, ProtectionCriteria, RouteGuard, RouteOutcome,
};
pub use rbac::{
    Action, AuthorizationResult, AuthorizeOptions, CurrentUserIdentity, IdentityPayload,
    IdentitySource, Permission, PermissionSet, RbacFacade, Resource, Role, UiVisibility,
};
pub use session::{HttpIdentityProvider, IdentityProvider, SessionStore};
