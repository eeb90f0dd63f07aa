//! Integration tests for merchant-rbac
//!
//! These tests drive the public API across module boundaries.

pub mod config_tests;
pub mod facade_tests;
pub mod session_tests;
