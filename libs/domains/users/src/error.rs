use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user '{0}' not found")]
    NotFound(String),

    #[error("user with email '{email}' or login '{login}' already exists")]
    AlreadyExists { email: String, login: String },

    #[error("login or password is incorrect")]
    BadCredentials,

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Prefixes the message of an internal error with the operation that failed.
    ///
    /// Sentinel variants are returned untouched so callers can keep matching on them.
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        match self {
            UserError::Internal(msg) => UserError::Internal(format!("{}: {}", context, msg)),
            UserError::PasswordHash(msg) => {
                UserError::PasswordHash(format!("{}: {}", context, msg))
            }
            other => other,
        }
    }
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Internal(format!("database error: {}", err))
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => {
                AppError::NotFound("the user for given login not found".to_string())
            }
            UserError::AlreadyExists { .. } => AppError::Conflict(
                "the user for given email or login already exists".to_string(),
            ),
            UserError::BadCredentials => {
                AppError::Unauthorized("login or password is incorrect".to_string())
            }
            UserError::PasswordHash(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
