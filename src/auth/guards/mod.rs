//! Authorization guards
//!
//! Presentation-side consumers of [`RbacFacade`](crate::auth::rbac::RbacFacade):
//! [`RouteGuard`] gates a whole screen and [`ActionGuard`] gates a single
//! control. Both delegate every decision to [`ProtectionCriteria`].

mod action;
mod criteria;
mod route;

pub use action::{ActionGuard, ActionOutcome};
pub use criteria::{GuardDecision, ProtectionCriteria};
pub use route::{ACCESS_DENIED_TITLE, RouteGuard, RouteOutcome};
