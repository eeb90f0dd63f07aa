//! Utility modules for the RBAC core
//!
//! - **error**: Error types and the crate-wide `Result` alias
//! - **logging**: Subscriber initialisation and structured authorization events

pub mod error;
pub mod logging;

pub use error::{RbacError, Result};
pub use logging::{AuthzLogger, init_logging};

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
