//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::ServiceCategory;
use super::error::{Result, UserError};
use super::role::Role;

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 32;

/// Path segments under `/api/users` that shadow the username routes
const RESERVED_USERNAMES: [&str; 3] = ["filter", "id", "register"];

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub services: Vec<ServiceCategory>,
    pub hourly_rate: Option<f64>,
    pub years_of_experience: Option<u16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration input
#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub repeat_password: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub services: Vec<ServiceCategory>,
    pub hourly_rate: Option<f64>,
    pub years_of_experience: Option<u16>,
}

/// A validated registration ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub services: Vec<ServiceCategory>,
    pub hourly_rate: Option<f64>,
    pub years_of_experience: Option<u16>,
}

/// Profile edit input. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EditUser {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub services: Option<Vec<ServiceCategory>>,
    pub hourly_rate: Option<f64>,
    pub years_of_experience: Option<u16>,
}

/// Service provider search criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFilter {
    /// Matches providers offering any of these; empty matches every provider
    pub services: Vec<ServiceCategory>,
    pub city: Option<String>,
    pub max_hourly_rate: Option<f64>,
    pub min_years_of_experience: Option<u16>,
}

impl User {
    /// A user offering at least one care service
    pub fn is_service_provider(&self) -> bool {
        !self.services.is_empty()
    }

    pub fn offers(&self, category: ServiceCategory) -> bool {
        self.services.contains(&category)
    }

    /// Apply profile changes, bumping `updated_at`
    pub fn apply_edit(&mut self, edit: EditUser) {
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(surname) = edit.surname {
            self.surname = surname;
        }
        if let Some(email) = edit.email {
            self.email = Some(email);
        }
        if let Some(phone_number) = edit.phone_number {
            self.phone_number = Some(phone_number);
        }
        if let Some(city) = edit.city {
            self.city = Some(city);
        }
        if let Some(description) = edit.description {
            self.description = Some(description);
        }
        if let Some(services) = edit.services {
            self.services = normalize_services(services);
        }
        if let Some(hourly_rate) = edit.hourly_rate {
            self.hourly_rate = Some(hourly_rate);
        }
        if let Some(years) = edit.years_of_experience {
            self.years_of_experience = Some(years);
        }
        self.updated_at = Utc::now();
    }
}

impl RegisterUser {
    /// Check credentials in order: well-formed username and password, then matching passwords
    pub fn validate(&self) -> Result<()> {
        let username = self.username.trim();

        if username.is_empty() || self.password.is_empty() {
            return Err(UserError::InvalidUsernameOrPassword);
        }

        let len = username.chars().count();
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
            return Err(UserError::InvalidUsernameOrPassword);
        }

        if RESERVED_USERNAMES
            .iter()
            .any(|reserved| username.eq_ignore_ascii_case(reserved))
        {
            return Err(UserError::InvalidUsernameOrPassword);
        }

        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(UserError::InvalidUsernameOrPassword);
        }

        if self.password != self.repeat_password {
            return Err(UserError::PasswordsDoNotMatch);
        }

        Ok(())
    }

    /// Turn into a storable user once the password has been hashed
    pub fn into_new_user(self, password_hash: String, role: Role) -> NewUser {
        NewUser {
            username: self.username.trim().to_string(),
            password_hash,
            role,
            name: self.name,
            surname: self.surname,
            email: self.email,
            phone_number: self.phone_number,
            city: self.city,
            description: self.description,
            services: normalize_services(self.services),
            hourly_rate: self.hourly_rate,
            years_of_experience: self.years_of_experience,
        }
    }
}

impl ServiceFilter {
    pub fn for_category(category: ServiceCategory) -> Self {
        Self {
            services: vec![category],
            ..Default::default()
        }
    }

    /// Check a user against every criterion that is set
    pub fn matches(&self, user: &User) -> bool {
        if !user.is_service_provider() {
            return false;
        }

        if !self.services.is_empty() && !self.services.iter().any(|c| user.offers(*c)) {
            return false;
        }

        if let Some(ref city) = self.city {
            match user.city {
                Some(ref user_city) if user_city.to_lowercase() == city.to_lowercase() => {}
                _ => return false,
            }
        }

        if let Some(max) = self.max_hourly_rate {
            match user.hourly_rate {
                Some(rate) if rate <= max => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_years_of_experience {
            match user.years_of_experience {
                Some(years) if years >= min => {}
                _ => return false,
            }
        }

        true
    }
}

/// Sorted and deduplicated
fn normalize_services(mut services: Vec<ServiceCategory>) -> Vec<ServiceCategory> {
    services.sort();
    services.dedup();
    services
}
