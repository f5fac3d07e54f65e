//! Translation of user errors into HTTP responses
//!
//! Known errors are answered with their status and the error message as a
//! plain-text body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::metrics_handler::record_user_error;
use crate::domain::user::UserError;

const FILTERING_FAILURE_PREFIX: &str = "An error occurred while filtering users: ";

#[derive(Debug)]
pub enum ApiError {
    /// Failure of a lookup, registration, edit or delete
    User(UserError),
    /// Failure of a filtering endpoint; unexpected errors get the filtering prefix
    Filtering(UserError),
}

impl ApiError {
    pub fn filtering(err: UserError) -> Self {
        ApiError::Filtering(err)
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        ApiError::User(err)
    }
}

/// HTTP status carried by each user error
pub fn status_code(err: &UserError) -> StatusCode {
    match err {
        UserError::UsernameDoesNotExist(_) | UserError::UserIdDoesNotExist(_) => {
            StatusCode::NOT_FOUND
        }
        UserError::InvalidUsernameOrPassword | UserError::PasswordsDoNotMatch => {
            StatusCode::BAD_REQUEST
        }
        UserError::UsernameAlreadyExists(_) => StatusCode::CONFLICT,
        UserError::FilteringNoMatch => StatusCode::NOT_FOUND,
        UserError::Storage(_) | UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (err, status, body) = match self {
            ApiError::User(err) => {
                let status = status_code(&err);
                let body = err.to_string();
                (err, status, body)
            }
            ApiError::Filtering(UserError::FilteringNoMatch) => {
                let err = UserError::FilteringNoMatch;
                let body = err.to_string();
                (err, StatusCode::NOT_FOUND, body)
            }
            ApiError::Filtering(err) => {
                let body = format!("{}{}", FILTERING_FAILURE_PREFIX, err);
                (err, StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        if status.is_server_error() {
            error!("API: {} ({})", body, status);
        } else {
            warn!("API: {} ({})", body, status);
        }
        record_user_error(err.kind());

        (status, body).into_response()
    }
}
