//! Custom test assertions

use merchant_rbac::AuthorizationResult;

/// Assertions for AuthorizationResult
pub trait AuthorizationAssertions {
    /// Assert the result is granted
    fn assert_granted(&self);

    /// Assert the result is denied and the reason contains `fragment`
    fn assert_denied_with(&self, fragment: &str);
}

impl AuthorizationAssertions for AuthorizationResult {
    fn assert_granted(&self) {
        assert!(
            self.authorized,
            "Expected {:?} to be granted, denied with {:?}",
            self.permission, self.reason
        );
    }

    fn assert_denied_with(&self, fragment: &str) {
        assert!(!self.authorized, "Expected {:?} to be denied", self.permission);
        let reason = self.reason.as_deref().unwrap_or_default();
        assert!(
            reason.contains(fragment),
            "Expected denial reason to contain {:?}, got {:?}",
            fragment,
            reason
        );
    }
}
