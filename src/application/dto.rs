//! Output views handed to the interface layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{Role, ServiceCategory, User};

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub id: i64,
    pub username: String,
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

impl From<User> for UserDetails {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            name: user.name,
            surname: user.surname,
            email: user.email,
            phone_number: user.phone_number,
            city: user.city,
            description: user.description,
            services: user.services,
            hourly_rate: user.hourly_rate,
            years_of_experience: user.years_of_experience,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl UserDetails {
    pub fn from_users(users: Vec<User>) -> Vec<UserDetails> {
        users.into_iter().map(UserDetails::from).collect()
    }
}
