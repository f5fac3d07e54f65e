//! User API DTOs (Data Transfer Objects)
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::user::{EditUser, RegisterUser, ServiceCategory, ServiceFilter};

/// Register user request
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUserRequest {
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

/// Edit user request
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditUserRequest {
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

/// Service provider filter request
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceFilterRequest {
    pub services: Vec<ServiceCategory>,
    pub city: Option<String>,
    pub max_hourly_rate: Option<f64>,
    pub min_years_of_experience: Option<u16>,
}

/// Generic API response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// Convert RegisterUserRequest to domain RegisterUser
impl From<RegisterUserRequest> for RegisterUser {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            repeat_password: req.repeat_password,
            name: req.name,
            surname: req.surname,
            email: req.email,
            phone_number: req.phone_number,
            city: req.city,
            description: req.description,
            services: req.services,
            hourly_rate: req.hourly_rate,
            years_of_experience: req.years_of_experience,
        }
    }
}

/// Convert EditUserRequest to domain EditUser
impl From<EditUserRequest> for EditUser {
    fn from(req: EditUserRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            email: req.email,
            phone_number: req.phone_number,
            city: req.city,
            description: req.description,
            services: req.services,
            hourly_rate: req.hourly_rate,
            years_of_experience: req.years_of_experience,
        }
    }
}

/// Convert ServiceFilterRequest to domain ServiceFilter
impl From<ServiceFilterRequest> for ServiceFilter {
    fn from(req: ServiceFilterRequest) -> Self {
        Self {
            services: req.services,
            city: req.city,
            max_hourly_rate: req.max_hourly_rate,
            min_years_of_experience: req.min_years_of_experience,
        }
    }
}
