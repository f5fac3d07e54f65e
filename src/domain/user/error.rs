//! User domain errors

use thiserror::Error;

/// User domain result type
pub type Result<T> = std::result::Result<T, UserError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UserError {
    #[error("User with username {0} does not exist")]
    UsernameDoesNotExist(String),

    #[error("User with id {0} does not exist")]
    UserIdDoesNotExist(i64),

    #[error("Invalid username or password")]
    InvalidUsernameOrPassword,

    #[error("Passwords do not match")]
    PasswordsDoNotMatch,

    #[error("User with username {0} already exists")]
    UsernameAlreadyExists(String),

    #[error("No users found matching the provided criteria")]
    FilteringNoMatch,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    /// Short machine-readable name, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            UserError::UsernameDoesNotExist(_) => "username_does_not_exist",
            UserError::UserIdDoesNotExist(_) => "user_id_does_not_exist",
            UserError::InvalidUsernameOrPassword => "invalid_username_or_password",
            UserError::PasswordsDoNotMatch => "passwords_do_not_match",
            UserError::UsernameAlreadyExists(_) => "username_already_exists",
            UserError::FilteringNoMatch => "filtering_no_match",
            UserError::Storage(_) => "storage",
            UserError::Internal(_) => "internal",
        }
    }

    /// Whether the failure was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UserError::Storage(_) | UserError::Internal(_))
    }
}
