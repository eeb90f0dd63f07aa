//! # merchant-rbac
//!
//! Role-based access control for merchant management apps.
//!
//! ## Features
//!
//! - **Typed catalog**: every `resource:action` permission is a [`Permission`] value
//! - **Role hierarchy**: `owner > admin > manager > staff` with per-role grant tiers
//! - **Fail-closed facade**: every query denies while the identity is loading
//! - **Session store**: TTL-based staleness, invalidation and superseded-fetch handling
//! - **Guards**: route and inline guards with fixed criterion precedence
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use merchant_rbac::{
//!     Config, HttpIdentityProvider, RbacFacade, Resource, SessionStore,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/rbac.yaml").await?;
//!     let endpoint = config.rbac.identity_endpoint.clone().ok_or("no identity endpoint")?;
//!
//!     let provider = HttpIdentityProvider::new(&endpoint)?.with_bearer_token("token");
//!     let store = Arc::new(SessionStore::from_config(Arc::new(provider), &config.rbac));
//!     store.refresh().await?;
//!
//!     let rbac = RbacFacade::with_config(store, &config.rbac);
//!     if rbac.can_view(Resource::Orders) {
//!         println!("orders visible");
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use auth::guards::{
    ActionGuard, ActionOutcome, GuardDecision, ProtectionCriteria, RouteGuard, RouteOutcome,
};
pub use auth::rbac::{
    Action, AuthorizationResult, AuthorizeOptions, CurrentUserIdentity, IdentityPayload,
    IdentitySource, LOADING_REASON, Permission, PermissionSet, RbacFacade, Resource, Role,
    StaticIdentity, UiVisibility,
};
pub use auth::session::{
    Clock, HttpIdentityProvider, IdentityProvider, ManualClock, SessionStore, SubscriptionId,
    SystemClock,
};
pub use config::{Config, IdentityEndpointConfig, RbacConfig};
pub use core::models::{MemberStatus, TeamMember};
pub use utils::error::{RbacError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
