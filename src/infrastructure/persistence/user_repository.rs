//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error};

use crate::domain::user::{
    NewUser, Result, Role, ServiceCategory, ServiceFilter, User, UserError, UserRepository,
};

const USER_COLUMNS: &str = "id, username, password_hash, role, name, surname, email, \
     phone_number, city, description, services, hourly_rate, years_of_experience, \
     created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
    name: String,
    surname: String,
    email: Option<String>,
    phone_number: Option<String>,
    city: Option<String>,
    description: Option<String>,
    services: Vec<String>,
    hourly_rate: Option<f64>,
    years_of_experience: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            role: Role::parse(&row.role).unwrap_or_default(),
            name: row.name,
            surname: row.surname,
            email: row.email,
            phone_number: row.phone_number,
            city: row.city,
            description: row.description,
            services: row
                .services
                .iter()
                .filter_map(|s| ServiceCategory::parse(s))
                .collect(),
            hourly_rate: row.hourly_rate,
            years_of_experience: row.years_of_experience.and_then(years_from_column),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn services_to_vec(services: &[ServiceCategory]) -> Vec<String> {
    services.iter().map(|c| c.as_str().to_string()).collect()
}

fn years_to_column(years: u16) -> i32 {
    i32::from(years)
}

/// Values outside the domain range read back as unknown
fn years_from_column(years: i32) -> Option<u16> {
    u16::try_from(years).ok()
}

fn storage_error(context: &str, e: sqlx::Error) -> UserError {
    error!("{}: {}", context, e);
    UserError::Storage(format!("{}: {}", context, e))
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, data: NewUser) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users
            (username, password_hash, role, name, surname, email, phone_number, city,
             description, services, hourly_rate, years_of_experience)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {USER_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&data.username)
            .bind(&data.password_hash)
            .bind(data.role.as_str())
            .bind(&data.name)
            .bind(&data.surname)
            .bind(&data.email)
            .bind(&data.phone_number)
            .bind(&data.city)
            .bind(&data.description)
            .bind(services_to_vec(&data.services))
            .bind(data.hourly_rate)
            .bind(data.years_of_experience.map(years_to_column))
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => {
                debug!("Created user {} (ID: {})", row.username, row.id);
                Ok(row.into())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(UserError::UsernameAlreadyExists(data.username))
            }
            Err(e) => Err(storage_error("Failed to create user", e)),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to get user", e))?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to get user by username", e))?;

        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC");

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to list users", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: &User) -> Result<User> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = $2, surname = $3, email = $4, phone_number = $5, city = $6,
                description = $7, services = $8, hourly_rate = $9,
                years_of_experience = $10, updated_at = $11
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.surname)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.city)
            .bind(&user.description)
            .bind(services_to_vec(&user.services))
            .bind(user.hourly_rate)
            .bind(user.years_of_experience.map(years_to_column))
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update user", e))?;

        match row {
            Some(row) => {
                debug!("Updated user {} (ID: {})", row.username, row.id);
                Ok(row.into())
            }
            None => Err(UserError::UserIdDoesNotExist(user.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete user", e))?;

        if row.is_some() {
            debug!("Deleted user ID: {}", id);
        }
        Ok(row.map(User::from))
    }

    async fn find_providers(&self, filter: &ServiceFilter) -> Result<Vec<User>> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE cardinality(services) > 0
              AND (cardinality($1::text[]) = 0 OR services && $1::text[])
              AND ($2::text IS NULL OR lower(city) = lower($2::text))
              AND ($3::float8 IS NULL OR hourly_rate <= $3::float8)
              AND ($4::int4 IS NULL OR years_of_experience >= $4::int4)
            ORDER BY id ASC
            "#
        );

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(services_to_vec(&filter.services))
            .bind(&filter.city)
            .bind(filter.max_hourly_rate)
            .bind(filter.min_years_of_experience.map(years_to_column))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to filter users", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
