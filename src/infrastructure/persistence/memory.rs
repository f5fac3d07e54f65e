//! In-memory user store

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::user::{NewUser, Result, ServiceFilter, User, UserError, UserRepository};

/// Users keyed by id; ids start at 1 and are never reused
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, data: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        // Checked under the write lock so concurrent registrations cannot both win
        if users.values().any(|u| u.username == data.username) {
            return Err(UserError::UsernameAlreadyExists(data.username));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: data.username,
            password_hash: data.password_hash,
            role: data.role,
            name: data.name,
            surname: data.surname,
            email: data.email,
            phone_number: data.phone_number,
            city: data.city,
            description: data.description,
            services: data.services,
            hourly_rate: data.hourly_rate,
            years_of_experience: data.years_of_experience,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        debug!("Created user {} (ID: {})", user.username, user.id);

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                debug!("Updated user {} (ID: {})", user.username, user.id);
                Ok(user.clone())
            }
            None => Err(UserError::UserIdDoesNotExist(user.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<Option<User>> {
        let removed = self.users.write().await.remove(&id);
        if removed.is_some() {
            debug!("Deleted user ID: {}", id);
        }
        Ok(removed)
    }

    async fn find_providers(&self, filter: &ServiceFilter) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, ServiceCategory};

    fn new_user(username: &str, services: Vec<ServiceCategory>) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
            name: "Test".to_string(),
            surname: "User".to_string(),
            email: None,
            phone_number: None,
            city: None,
            description: None,
            services,
            hourly_rate: None,
            years_of_experience: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(new_user("first", vec![])).await.unwrap();
        let second = repo.create(new_user("second", vec![])).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        repo.delete(second.id).await.unwrap();
        let third = repo.create(new_user("third", vec![])).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("ana", vec![])).await.unwrap();
        let err = repo.create(new_user("ana", vec![])).await.unwrap_err();
        assert_eq!(err, UserError::UsernameAlreadyExists("ana".to_string()));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo.create(new_user("ana", vec![])).await.unwrap();
        repo.delete(user.id).await.unwrap();

        user.name = "Changed".to_string();
        assert_eq!(
            repo.update(&user).await.unwrap_err(),
            UserError::UserIdDoesNotExist(user.id)
        );
    }

    #[tokio::test]
    async fn test_find_providers_by_category() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("kids", vec![ServiceCategory::ChildCare]))
            .await
            .unwrap();
        repo.create(new_user("pets", vec![ServiceCategory::PetCare]))
            .await
            .unwrap();
        repo.create(new_user("plain", vec![])).await.unwrap();

        let all = repo.find_providers(&ServiceFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let pets = repo
            .find_providers(&ServiceFilter::for_category(ServiceCategory::PetCare))
            .await
            .unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].username, "pets");
    }
}
