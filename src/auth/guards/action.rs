//! Inline guard for individual controls and sections

use super::criteria::{GuardDecision, ProtectionCriteria};
use crate::auth::rbac::{LOADING_REASON, RbacFacade};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Children,
    /// Render nothing
    Hidden,
    /// Small placeholder carrying the denial reason
    Locked { reason: String },
}

/// Gate for a button, menu entry or section
#[derive(Debug, Clone)]
pub struct ActionGuard {
    criteria: ProtectionCriteria,
    show_fallback: bool,
}

impl ActionGuard {
    pub fn new(criteria: ProtectionCriteria) -> Self {
        Self {
            criteria,
            show_fallback: true,
        }
    }

    /// `false` makes denied controls disappear instead of showing a lock
    pub fn show_fallback(mut self, show: bool) -> Self {
        self.show_fallback = show;
        self
    }

    pub fn render(&self, rbac: &RbacFacade) -> ActionOutcome {
        let reason = match self.criteria.decide(rbac) {
            GuardDecision::Authorized => return ActionOutcome::Children,
            GuardDecision::Loading => LOADING_REASON.to_string(),
            GuardDecision::Denied { reason } => reason,
        };

        if self.show_fallback {
            ActionOutcome::Locked { reason }
        } else {
            ActionOutcome::Hidden
        }
    }
}
