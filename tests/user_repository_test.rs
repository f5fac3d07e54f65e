//! PostgreSQL User Repository Integration Tests

#![cfg(feature = "postgres")]

use kindly::config::Config;
use kindly::domain::user::{
    NewUser, Role, ServiceCategory, ServiceFilter, UserError, UserRepository,
};
use kindly::infrastructure::persistence::{create_pool, run_migrations, PgUserRepository};
use sqlx::PgPool;

#[tokio::test]
#[ignore] // Requires database
async fn test_user_create_and_get() {
    let pool = setup_database().await;
    let repo = PgUserRepository::new(pool.clone());

    let user = repo
        .create(new_user("test-repo-ana", vec![ServiceCategory::ChildCare]))
        .await
        .expect("Failed to create user");

    let by_id = repo.find_by_id(user.id).await.expect("Failed to get user");
    assert_eq!(by_id.as_ref().map(|u| u.username.as_str()), Some("test-repo-ana"));

    let by_name = repo
        .find_by_username("test-repo-ana")
        .await
        .expect("Failed to get user")
        .unwrap();
    assert_eq!(by_name.id, user.id);
    assert_eq!(by_name.role, Role::User);
    assert_eq!(by_name.services, vec![ServiceCategory::ChildCare]);

    cleanup_database(pool, "test-repo-ana").await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_user_duplicate_username() {
    let pool = setup_database().await;
    let repo = PgUserRepository::new(pool.clone());

    repo.create(new_user("test-repo-dup", vec![]))
        .await
        .expect("Failed to create user");
    let err = repo.create(new_user("test-repo-dup", vec![])).await.unwrap_err();
    assert_eq!(err, UserError::UsernameAlreadyExists("test-repo-dup".to_string()));

    cleanup_database(pool, "test-repo-dup").await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_user_update_and_delete() {
    let pool = setup_database().await;
    let repo = PgUserRepository::new(pool.clone());

    let mut user = repo
        .create(new_user("test-repo-edit", vec![]))
        .await
        .expect("Failed to create user");
    user.city = Some("Ohrid".to_string());
    user.services = vec![ServiceCategory::PetCare];

    let updated = repo.update(&user).await.expect("Failed to update user");
    assert_eq!(updated.city.as_deref(), Some("Ohrid"));
    assert_eq!(updated.services, vec![ServiceCategory::PetCare]);

    let deleted = repo.delete(user.id).await.expect("Failed to delete user");
    assert_eq!(deleted.map(|u| u.id), Some(user.id));
    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    assert!(repo.delete(user.id).await.unwrap().is_none());

    cleanup_database(pool, "test-repo-edit").await;
}

#[tokio::test]
#[ignore] // Requires database
async fn test_user_find_providers() {
    let pool = setup_database().await;
    let repo = PgUserRepository::new(pool.clone());

    let mut kids = new_user("test-repo-f-kids", vec![ServiceCategory::ChildCare]);
    kids.city = Some("Skopje".to_string());
    kids.hourly_rate = Some(9.0);
    repo.create(kids).await.unwrap();

    let mut elders = new_user("test-repo-f-elders", vec![ServiceCategory::ElderCare]);
    elders.city = Some("Bitola".to_string());
    elders.hourly_rate = Some(20.0);
    repo.create(elders).await.unwrap();

    repo.create(new_user("test-repo-f-plain", vec![])).await.unwrap();

    let filter = ServiceFilter {
        services: vec![ServiceCategory::ChildCare],
        city: Some("skopje".to_string()),
        max_hourly_rate: Some(10.0),
        min_years_of_experience: None,
    };
    let found = repo.find_providers(&filter).await.unwrap();
    let names: Vec<&str> = found
        .iter()
        .map(|u| u.username.as_str())
        .filter(|n| n.starts_with("test-repo-f-"))
        .collect();
    assert_eq!(names, vec!["test-repo-f-kids"]);

    let any = repo.find_providers(&ServiceFilter::default()).await.unwrap();
    assert!(any.iter().all(|u| u.is_service_provider()));

    cleanup_database(pool, "test-repo-f-").await;
}

// Helper functions

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

async fn setup_database() -> PgPool {
    let mut config = Config::default().database;
    config.url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost/kindly_test".to_string());
    config.max_connections = 5;
    config.min_connections = 1;

    let pool = create_pool(&config).await.expect("Failed to create pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Each test owns the usernames starting with its prefix
async fn cleanup_database(pool: PgPool, prefix: &str) {
    sqlx::query("DELETE FROM users WHERE username LIKE $1")
        .bind(format!("{}%", prefix))
        .execute(&pool)
        .await
        .ok();
    pool.close().await;
}
