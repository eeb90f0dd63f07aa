//! Team models
//!
//! Members of a merchant's team as listed on the team screen.

mod member;


pub use member::{MemberStatus, TeamMember};
