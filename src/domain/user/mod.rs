//! User domain

pub mod category;
pub mod entity;
pub mod error;
pub mod repository;
pub mod role;

pub use category::ServiceCategory;
pub use entity::{EditUser, NewUser, RegisterUser, ServiceFilter, User};
pub use error::{Result, UserError};
pub use repository::UserRepository;
pub use role::Role;
