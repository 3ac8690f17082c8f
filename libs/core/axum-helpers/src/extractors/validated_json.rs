//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Rejects with `AppError::JsonExtractorRejection` when the body is not valid
/// JSON for `T`, and with `AppError::ValidationError` (400, per-field details)
/// when `T::validate` fails.
///
/// ```ignore
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct NewUser {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn register(ValidatedJson(input): ValidatedJson<NewUser>) -> String {
///     input.email
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
