//! Common test utilities for merchant-rbac
//!
//! - Identity fixtures for every role
//! - A scripted [`IdentityProvider`](merchant_rbac::IdentityProvider)
//! - Assertions on authorization results

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::AuthorizationAssertions;
pub use fixtures::{IdentityFactory, ScriptedProvider};

/// Parse a permission token, panicking on typos in test code
pub fn perm(token: &str) -> merchant_rbac::Permission {
    token
        .parse()
        .unwrap_or_else(|e| panic!("bad permission token {}: {}", token, e))
}
