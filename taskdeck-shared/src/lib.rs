//! # TaskDeck Shared Library
//!
//! This crate contains the types and business logic shared by the TaskDeck
//! API server: database models, the connection pool, and the authentication
//! primitives (password hashing, token issuance, bearer middleware).
//!
//! ## Module Organization
//!
//! - `models`: Database models and their owner-scoped CRUD operations
//! - `auth`: Password hashing, JWT tokens, and request authentication
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TaskDeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
