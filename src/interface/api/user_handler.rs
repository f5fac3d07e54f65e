//! User API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::error::ApiError;
use super::metrics_handler::{record_user_deleted, record_user_registered};
use super::user_dto::{ApiResponse, EditUserRequest, RegisterUserRequest, ServiceFilterRequest};
use crate::application::{UserDetails, UserService};
use crate::domain::user::{Role, UserError};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    /// Status for successful detail lookups
    pub lookup_status: StatusCode,
}

impl AppState {
    pub fn new(user_service: Arc<UserService>, legacy_found_status: bool) -> Self {
        Self {
            user_service,
            lookup_status: if legacy_found_status {
                StatusCode::FOUND
            } else {
                StatusCode::OK
            },
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// List all users
pub async fn list_all_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDetails>>> {
    info!("API: Listing all users");
    let users = state.user_service.list_all().await?;
    Ok(Json(users))
}

/// Get user by username
pub async fn find_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<(StatusCode, Json<UserDetails>)> {
    info!("API: Getting user by username: {}", username);
    let user = state.user_service.find_by_username(&username).await?;
    Ok((state.lookup_status, Json(user)))
}

/// Get user by ID
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<UserDetails>)> {
    info!("API: Getting user ID: {}", id);
    let user = state.user_service.find_by_id(id).await?;
    Ok((state.lookup_status, Json(user)))
}

/// Register a new user with the USER role
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> ApiResult<(StatusCode, Json<UserDetails>)> {
    info!("API: Registering user {}", req.username);
    let user = state.user_service.register(req.into(), Role::User).await?;
    record_user_registered();
    Ok((StatusCode::CREATED, Json(user)))
}

/// Edit user by username
pub async fn edit_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(req): Json<EditUserRequest>,
) -> ApiResult<Json<UserDetails>> {
    info!("API: Editing user {}", username);
    let user = state
        .user_service
        .edit_by_username(&username, req.into())
        .await?;
    Ok(Json(user))
}

/// Edit user by ID
pub async fn edit_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EditUserRequest>,
) -> ApiResult<Json<UserDetails>> {
    info!("API: Editing user ID: {}", id);
    let user = state.user_service.edit_by_id(id, req.into()).await?;
    Ok(Json(user))
}

/// Delete user by username, returning the removed user
pub async fn delete_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserDetails>> {
    info!("API: Deleting user {}", username);
    let user = state.user_service.delete_by_username(&username).await?;
    record_user_deleted();
    Ok(Json(user))
}

/// Delete user by ID, returning the removed user
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserDetails>> {
    info!("API: Deleting user ID: {}", id);
    let user = state.user_service.delete_by_id(id).await?;
    record_user_deleted();
    Ok(Json(user))
}

/// Filter service providers; an empty result is reported as 404
pub async fn filter_users(
    State(state): State<AppState>,
    Json(req): Json<ServiceFilterRequest>,
) -> ApiResult<Json<Vec<UserDetails>>> {
    info!("API: Filtering users");
    let users = state
        .user_service
        .find_service_providers(req.into())
        .await
        .map_err(ApiError::filtering)?;
    non_empty(users)
}

pub async fn find_child_care(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDetails>>> {
    info!("API: Listing child care providers");
    let users = state
        .user_service
        .find_child_care()
        .await
        .map_err(ApiError::filtering)?;
    non_empty(users)
}

pub async fn find_elder_care(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDetails>>> {
    info!("API: Listing elder care providers");
    let users = state
        .user_service
        .find_elder_care()
        .await
        .map_err(ApiError::filtering)?;
    non_empty(users)
}

/// Unlike child and elder care, an empty pet care list is a 200
pub async fn find_pet_care(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDetails>>> {
    info!("API: Listing pet care providers");
    let users = state
        .user_service
        .find_pet_care()
        .await
        .map_err(ApiError::filtering)?;
    Ok(Json(users))
}

/// Health check endpoint
pub async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("OK"))
}

fn non_empty(users: Vec<UserDetails>) -> ApiResult<Json<Vec<UserDetails>>> {
    if users.is_empty() {
        return Err(ApiError::filtering(UserError::FilteringNoMatch));
    }
    Ok(Json(users))
}
