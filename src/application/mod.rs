//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases.
//! It's responsible for:
//! - Enforcing registration rules
//! - Password hashing
//! - Converting between domain models and DTOs

pub mod dto;
pub mod user_service;

pub use dto::UserDetails;
pub use user_service::UserService;
