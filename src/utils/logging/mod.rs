//! Logging setup and security-aware authorization events
//!
//! Decisions are emitted as `tracing` events under the [`AUTHZ_TARGET`] target so
//! hosts can route them separately (`RUST_LOG=merchant_rbac::authz=debug`).

use crate::utils::error::{RbacError, Result};
use crate::utils::truncate_string;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::EnvFilter;

/// `tracing` target used for authorization decisions
pub const AUTHZ_TARGET: &str = "merchant_rbac::authz";

/// Longest reason string written to a log line
const MAX_REASON_LEN: usize = 200;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it is set. Set `json` for
/// machine-readable output.
pub fn init_logging(level: Level, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| RbacError::config(format!("Failed to install subscriber: {}", e)))
}

/// Structured logging for authorization outcomes
pub struct AuthzLogger;

impl AuthzLogger {
    /// Log a single authorization decision
    pub fn log_decision(role: Option<&str>, permission: &str, granted: bool, reason: Option<&str>) {
        let role = role.unwrap_or("<none>");
        // Reasons can carry server-provided text
        let reason = reason.map(|r| truncate_string(r, MAX_REASON_LEN));

        if granted {
            debug!(
                target: AUTHZ_TARGET,
                role,
                permission,
                granted,
                "Authorization granted"
            );
        } else {
            debug!(
                target: AUTHZ_TARGET,
                role,
                permission,
                granted,
                reason = reason.as_deref().unwrap_or(""),
                "Authorization denied"
            );
        }
    }

    /// Log a role-editing decision (edit member / assign role)
    pub fn log_role_decision(operation: &str, actor: Option<&str>, target: &str, granted: bool) {
        debug!(
            target: AUTHZ_TARGET,
            operation,
            actor = actor.unwrap_or("<none>"),
            target_role = target,
            granted,
            "Role decision"
        );
    }

    /// Log a session lifecycle change
    pub fn log_session_event(event: &str, revision: u64, role: Option<&str>) {
        info!(
            target: AUTHZ_TARGET,
            event,
            revision,
            role = role.unwrap_or("<none>"),
            "Session identity updated"
        );
    }

    /// Log a failed identity fetch
    pub fn log_fetch_failure(error: &str) {
        let error = truncate_string(error, MAX_REASON_LEN);
        warn!(
            target: AUTHZ_TARGET,
            error = error.as_str(),
            "Identity fetch failed; failing closed"
        );
    }
}
