//! Kindly - user management service for a care services marketplace
//!
//! Providers register and list the care they offer (child, elder and pet
//! care); clients browse and filter them. The crate follows a layered
//! layout: domain, application services, infrastructure and the HTTP
//! interface.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::user::{Result, UserError};
