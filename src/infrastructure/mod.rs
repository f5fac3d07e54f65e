//! Infrastructure layer - Technical implementations
//!
//! This layer contains the repository implementations: an in-memory store
//! and, with the `postgres` feature, a PostgreSQL store.

pub mod persistence;
