//! User service: business rules between the API and the repository

use std::sync::Arc;
use tracing::{debug, info};

use super::dto::UserDetails;
use crate::domain::user::{
    EditUser, RegisterUser, Result, Role, ServiceCategory, ServiceFilter, User, UserError,
    UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            repository,
            bcrypt_cost,
        }
    }

    /// All users, ordered by id
    pub async fn list_all(&self) -> Result<Vec<UserDetails>> {
        let users = self.repository.list().await?;
        Ok(UserDetails::from_users(users))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<UserDetails> {
        self.user_by_username(username).await.map(UserDetails::from)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<UserDetails> {
        self.user_by_id(id).await.map(UserDetails::from)
    }

    /// Validate credentials, hash the password and store the user.
    /// Nothing is stored when any check fails.
    pub async fn register(&self, data: RegisterUser, role: Role) -> Result<UserDetails> {
        data.validate()?;

        let username = data.username.trim().to_string();
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(UserError::UsernameAlreadyExists(username));
        }

        let password_hash = self.hash_password(data.password.clone()).await?;
        let user = self
            .repository
            .create(data.into_new_user(password_hash, role))
            .await?;

        info!("Registered user {} (ID: {}, role: {})", user.username, user.id, user.role);
        Ok(user.into())
    }

    pub async fn edit_by_username(&self, username: &str, edit: EditUser) -> Result<UserDetails> {
        let user = self.user_by_username(username).await?;
        self.apply_edit(user, edit).await
    }

    pub async fn edit_by_id(&self, id: i64, edit: EditUser) -> Result<UserDetails> {
        let user = self.user_by_id(id).await?;
        self.apply_edit(user, edit).await
    }

    /// Delete and return the removed user
    pub async fn delete_by_username(&self, username: &str) -> Result<UserDetails> {
        let user = self.user_by_username(username).await?;
        self.repository
            .delete(user.id)
            .await?
            .map(UserDetails::from)
            .ok_or_else(|| UserError::UsernameDoesNotExist(username.to_string()))
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<UserDetails> {
        self.repository
            .delete(id)
            .await?
            .map(UserDetails::from)
            .ok_or(UserError::UserIdDoesNotExist(id))
    }

    /// Service providers matching every set criterion. May be empty.
    pub async fn find_service_providers(&self, filter: ServiceFilter) -> Result<Vec<UserDetails>> {
        debug!("Filtering service providers: {:?}", filter);
        let users = self.repository.find_providers(&filter).await?;
        Ok(UserDetails::from_users(users))
    }

    pub async fn find_by_category(&self, category: ServiceCategory) -> Result<Vec<UserDetails>> {
        self.find_service_providers(ServiceFilter::for_category(category))
            .await
    }

    pub async fn find_child_care(&self) -> Result<Vec<UserDetails>> {
        self.find_by_category(ServiceCategory::ChildCare).await
    }

    pub async fn find_elder_care(&self) -> Result<Vec<UserDetails>> {
        self.find_by_category(ServiceCategory::ElderCare).await
    }

    pub async fn find_pet_care(&self) -> Result<Vec<UserDetails>> {
        self.find_by_category(ServiceCategory::PetCare).await
    }

    async fn user_by_username(&self, username: &str) -> Result<User> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::UsernameDoesNotExist(username.to_string()))
    }

    async fn user_by_id(&self, id: i64) -> Result<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::UserIdDoesNotExist(id))
    }

    async fn apply_edit(&self, mut user: User, edit: EditUser) -> Result<UserDetails> {
        user.apply_edit(edit);
        let updated = self.repository.update(&user).await?;
        info!("Edited user {} (ID: {})", updated.username, updated.id);
        Ok(updated.into())
    }

    // bcrypt blocks, run it on the blocking pool
    async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| UserError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| UserError::Internal(format!("Failed to hash password: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::repository::MockUserRepository;
    use crate::infrastructure::persistence::InMemoryUserRepository;

    const TEST_COST: u32 = 4;

    fn service() -> (UserService, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        (UserService::new(repo.clone(), TEST_COST), repo)
    }

    fn registration(username: &str, services: Vec<ServiceCategory>) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            password: "secret".to_string(),
            repeat_password: "secret".to_string(),
            name: "Ana".to_string(),
            surname: "Stojanova".to_string(),
            city: Some("Skopje".to_string()),
            services,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (service, repo) = service();

        let details = service
            .register(registration("ana", vec![]), Role::User)
            .await
            .unwrap();
        assert_eq!(details.username, "ana");
        assert_eq!(details.role, Role::User);

        let stored = repo.find_by_username("ana").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret");
        assert!(bcrypt::verify("secret", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let (service, repo) = service();
        let mut data = registration("ana", vec![]);
        data.repeat_password = "other".to_string();

        let err = service.register(data, Role::User).await.unwrap_err();
        assert_eq!(err, UserError::PasswordsDoNotMatch);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let (service, repo) = service();
        service
            .register(registration("ana", vec![]), Role::User)
            .await
            .unwrap();

        let err = service
            .register(registration("ana", vec![]), Role::User)
            .await
            .unwrap_err();
        assert_eq!(err, UserError::UsernameAlreadyExists("ana".to_string()));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_unknown_user() {
        let (service, _) = service();
        assert_eq!(
            service.find_by_username("ghost").await.unwrap_err(),
            UserError::UsernameDoesNotExist("ghost".to_string())
        );
        assert_eq!(
            service.find_by_id(42).await.unwrap_err(),
            UserError::UserIdDoesNotExist(42)
        );
    }

    #[tokio::test]
    async fn test_edit_and_delete() {
        let (service, _) = service();
        let created = service
            .register(registration("ana", vec![]), Role::User)
            .await
            .unwrap();

        let edited = service
            .edit_by_id(
                created.id,
                EditUser {
                    services: Some(vec![ServiceCategory::PetCare]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.services, vec![ServiceCategory::PetCare]);
        assert_eq!(edited.username, "ana");

        let deleted = service.delete_by_username("ana").await.unwrap();
        assert_eq!(deleted.id, created.id);
        assert_eq!(
            service.delete_by_id(created.id).await.unwrap_err(),
            UserError::UserIdDoesNotExist(created.id)
        );
    }

    #[tokio::test]
    async fn test_category_filters() {
        let (service, _) = service();
        for (name, services) in [
            ("kids", vec![ServiceCategory::ChildCare]),
            ("elders", vec![ServiceCategory::ElderCare]),
            ("both", vec![ServiceCategory::ChildCare, ServiceCategory::ElderCare]),
            ("plain", vec![]),
        ] {
            service
                .register(registration(name, services), Role::User)
                .await
                .unwrap();
        }

        let child: Vec<String> = service
            .find_child_care()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(child, vec!["kids", "both"]);

        let elder = service.find_elder_care().await.unwrap();
        assert!(elder.iter().all(|u| u.services.contains(&ServiceCategory::ElderCare)));
        assert_eq!(elder.len(), 2);

        assert!(service.find_pet_care().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_providers()
            .returning(|_| Err(UserError::Storage("connection refused".to_string())));

        let service = UserService::new(Arc::new(repo), TEST_COST);
        let err = service.find_child_care().await.unwrap_err();
        assert_eq!(err, UserError::Storage("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_register_stops_before_create_on_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .withf(|username| username == "ana")
            .returning(|_| {
                let now = chrono::Utc::now();
                Ok(Some(User {
                    id: 1,
                    username: "ana".to_string(),
                    password_hash: "hash".to_string(),
                    role: Role::User,
                    name: String::new(),
                    surname: String::new(),
                    email: None,
                    phone_number: None,
                    city: None,
                    description: None,
                    services: Vec::new(),
                    hourly_rate: None,
                    years_of_experience: None,
                    created_at: now,
                    updated_at: now,
                }))
            });
        repo.expect_create().never();

        let service = UserService::new(Arc::new(repo), TEST_COST);
        let err = service
            .register(registration("ana", vec![]), Role::User)
            .await
            .unwrap_err();
        assert_eq!(err, UserError::UsernameAlreadyExists("ana".to_string()));
    }
}
