use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use axum_helpers::{JwtAuth, ValidatedJson};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse, NewUser, RegisterResponse};
use crate::repository::UsersStorage;
use crate::service::AuthService;

struct AuthState<S: UsersStorage> {
    service: AuthService<S>,
    jwt: JwtAuth,
}

/// Create the public auth router (`/register`, `/login`)
pub fn router<S: UsersStorage + 'static>(service: AuthService<S>, jwt: JwtAuth) -> Router {
    let state = Arc::new(AuthState { service, jwt });

    Router::new()
        .route("/register", post(register::<S>))
        .route("/login", post(login::<S>))
        .with_state(state)
}

/// Register a new user
///
/// POST /register
async fn register<S: UsersStorage>(
    State(state): State<Arc<AuthState<S>>>,
    ValidatedJson(input): ValidatedJson<NewUser>,
) -> UserResult<impl IntoResponse> {
    let id = state.service.new_user(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}

/// Exchange credentials for an access token
///
/// POST /login
async fn login<S: UsersStorage>(
    State(state): State<Arc<AuthState<S>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    let user_id = state.service.login(&input.login, &input.password).await?;

    let access_token = state
        .jwt
        .create_access_token(&user_id)
        .map_err(|e| UserError::Internal(format!("issuing access token: {}", e)))?;

    tracing::info!(user_id = %user_id, "User logged in");
    Ok(Json(LoginResponse { access_token }))
}
