//! Team member models

use crate::auth::rbac::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Member ID
    pub id: String,
    pub name: String,
    pub email: String,
    /// Member role
    pub role: Role,
    /// Member status
    pub status: MemberStatus,
    /// Joined at
    pub joined_at: DateTime<Utc>,
    /// Who sent the invitation, if anyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_by: Option<String>,
}

/// Member status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Active member
    Active,
    /// Pending invitation
    Pending,
    /// Suspended member
    Suspended,
    /// Left team
    Left,
}

impl TeamMember {
    /// Create an active team member
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            status: MemberStatus::Active,
            joined_at: Utc::now(),
            invited_by: None,
        }
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn invited_by(mut self, inviter: impl Into<String>) -> Self {
        self.invited_by = Some(inviter.into());
        self.status = MemberStatus::Pending;
        self
    }

    /// Check if member is active
    pub fn is_active(&self) -> bool {
        matches!(self.status, MemberStatus::Active)
    }

    /// Role label shown next to the member's name
    pub fn role_label(&self) -> &'static str {
        self.role.display_name()
    }
}
