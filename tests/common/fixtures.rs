//! Test fixtures and data factories
//!
//! Provides factory methods for creating identities with sensible defaults.

use async_trait::async_trait;
use merchant_rbac::auth::rbac::permissions_for_role;
use merchant_rbac::{
    CurrentUserIdentity, IdentityPayload, IdentityProvider, PermissionSet, RbacError, Result,
    Role,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Factory for creating identities and wire payloads
pub struct IdentityFactory;

impl IdentityFactory {
    /// Resolved identity holding the catalog grants of `role`
    pub fn for_role(role: Role) -> CurrentUserIdentity {
        CurrentUserIdentity::resolved(role, permissions_for_role(role))
    }

    /// Resolved identity with an explicit token list
    pub fn with_tokens(role: Role, tokens: &[&str]) -> CurrentUserIdentity {
        CurrentUserIdentity::resolved(role, PermissionSet::from_tokens(tokens))
    }

    /// Wire payload carrying the catalog grants of `role`
    pub fn payload(role: Role) -> IdentityPayload {
        IdentityPayload::new(role, permissions_for_role(role).tokens())
    }
}

/// Provider that replays a fixed script of fetch results
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<IdentityPayload>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Result<IdentityPayload>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider that answers every fetch with the catalog grants of `role`
    pub fn always(role: Role, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(IdentityFactory::payload(role))))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn fetch_identity(&self) -> Result<IdentityPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RbacError::identity_fetch("script exhausted")))
    }
}
