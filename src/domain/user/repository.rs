//! User repository interface

use super::entity::{NewUser, ServiceFilter, User};
use super::error::Result;
use async_trait::async_trait;

/// User repository trait
///
/// Implementations report a taken username on `create` as
/// [`UserError::UsernameAlreadyExists`](super::UserError::UsernameAlreadyExists)
/// and any backend failure as `UserError::Storage`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user, assigning its id
    async fn create(&self, data: NewUser) -> Result<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// List all users ordered by id
    async fn list(&self) -> Result<Vec<User>>;

    /// Persist changed profile fields of an existing user
    async fn update(&self, user: &User) -> Result<User>;

    /// Delete user, returning it if it existed
    async fn delete(&self, id: i64) -> Result<Option<User>>;

    /// Service providers matching the filter, ordered by id
    async fn find_providers(&self, filter: &ServiceFilter) -> Result<Vec<User>>;
}
