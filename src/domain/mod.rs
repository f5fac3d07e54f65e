//! Domain layer - Core business logic and rules
//!
//! This layer contains:
//! - Entities: the user account and its service offering
//! - Value Objects: roles and service categories
//! - Repository Interfaces: Ports for persistence
//! - Domain errors

pub mod user;
