use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::ParseSexError;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile '{0}' not found")]
    NotFound(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ProfileResult<T> = Result<T, ProfileError>;

impl ProfileError {
    /// Prefixes the message of an internal error with the operation that failed.
    ///
    /// Sentinel variants are returned untouched so callers can keep matching on them.
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        match self {
            ProfileError::Internal(msg) => ProfileError::Internal(format!("{}: {}", context, msg)),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::NotFound(_))
    }
}

impl From<ParseSexError> for ProfileError {
    fn from(err: ParseSexError) -> Self {
        ProfileError::Parse(err.to_string())
    }
}

impl From<sea_orm::DbErr> for ProfileError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProfileError::Internal(format!("database error: {}", err))
    }
}

/// Convert ProfileError to AppError for standardized error responses
impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => AppError::NotFound("profile not found".to_string()),
            ProfileError::Parse(msg) => AppError::BadRequest(msg),
            ProfileError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
