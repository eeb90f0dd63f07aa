//! Domain models consumed by the authorization rules

pub mod models;
