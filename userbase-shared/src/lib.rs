//! # Userbase Shared Library
//!
//! This crate contains the data layer and credential utilities used by the
//! Userbase API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migration runner
//! - `models`: Database models and their queries
//! - `auth`: Password hashing and email normalization

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Userbase shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
