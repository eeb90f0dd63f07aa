//! Core data models

pub mod team;

pub use team::{MemberStatus, TeamMember};
