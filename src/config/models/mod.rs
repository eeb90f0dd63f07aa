//! Configuration data models

pub mod rbac;

pub use rbac::*;

/// Default staleness window for the session identity, in seconds
pub fn default_session_ttl() -> u64 {
    300
}

pub fn default_fallback_route() -> String {
    "/".to_string()
}

pub fn default_identity_path() -> String {
    "/auth/me".to_string()
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    10
}

pub(crate) fn default_true() -> bool {
    true
}
