//! Screen-level guard

use super::criteria::{GuardDecision, ProtectionCriteria};
use crate::auth::rbac::RbacFacade;
use crate::config::RbacConfig;
use tracing::debug;

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";

/// What a guarded screen should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Placeholder while the identity resolves; never redirects
    Loading,
    Children,
    AccessDenied { title: String, message: String },
    Redirect { route: String },
}

/// Gate for a whole screen.
///
/// Keeps state between renders so the denial callback fires once per
/// transition into the denied state rather than on every render.
pub struct RouteGuard {
    criteria: ProtectionCriteria,
    redirect_on_denied: bool,
    fallback_route: String,
    on_unauthorized: Option<Box<dyn FnMut() + Send>>,
    denied: bool,
}

impl RouteGuard {
    pub fn new(criteria: ProtectionCriteria) -> Self {
        Self {
            criteria,
            redirect_on_denied: false,
            fallback_route: "/".to_string(),
            on_unauthorized: None,
            denied: false,
        }
    }

    /// Guard using the configured fallback route and denial mode
    pub fn from_config(criteria: ProtectionCriteria, config: &RbacConfig) -> Self {
        Self::new(criteria)
            .redirect_to(config.fallback_route.clone())
            .redirect_on_denied(config.redirect_on_denied)
    }

    pub fn redirect_on_denied(mut self, redirect: bool) -> Self {
        self.redirect_on_denied = redirect;
        self
    }

    pub fn redirect_to(mut self, route: impl Into<String>) -> Self {
        self.fallback_route = route.into();
        self
    }

    pub fn on_unauthorized(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(callback));
        self
    }

    pub fn criteria(&self) -> &ProtectionCriteria {
        &self.criteria
    }

    pub fn render(&mut self, rbac: &RbacFacade) -> RouteOutcome {
        let reason = match self.criteria.decide(rbac) {
            GuardDecision::Authorized => {
                self.denied = false;
                return RouteOutcome::Children;
            }
            GuardDecision::Loading => {
                self.denied = false;
                return RouteOutcome::Loading;
            }
            GuardDecision::Denied { reason } => reason,
        };

        if !self.denied {
            self.denied = true;
            debug!("Route guard denied access: {}", reason);
            if let Some(callback) = self.on_unauthorized.as_mut() {
                callback();
            }
        }

        if self.redirect_on_denied {
            RouteOutcome::Redirect {
                route: self.fallback_route.clone(),
            }
        } else {
            RouteOutcome::AccessDenied {
                title: ACCESS_DENIED_TITLE.to_string(),
                message: reason,
            }
        }
    }
}
