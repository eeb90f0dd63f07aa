//! Error handling for the RBAC core
//!
//! Authorization denials are never errors; they are normal return values. The
//! variants here cover configuration, identity fetching and token parsing.

mod helpers;
mod types;

pub use types::{RbacError, Result};
