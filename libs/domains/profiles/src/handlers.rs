use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{JwtAuth, JwtClaims, ValidatedJson, jwt_auth_middleware};
use std::sync::Arc;

use crate::error::ProfileResult;
use crate::models::{CreatedResponse, ProfilePayload, ProfileResponse, SearchParams};
use crate::repository::ProfilesStorage;
use crate::service::ProfilesService;

/// Create the profiles router; every route requires a bearer token
pub fn router<S: ProfilesStorage + 'static>(service: ProfilesService<S>, jwt: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_profiles::<S>).post(create_profile::<S>))
        .route("/search", get(search_profiles::<S>))
        .route("/{id}", get(get_profile::<S>))
        .with_state(shared_service)
        .layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware))
}

/// Create a profile owned by the authenticated user
///
/// POST /profiles
async fn create_profile<S: ProfilesStorage>(
    State(service): State<Arc<ProfilesService<S>>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(payload): ValidatedJson<ProfilePayload>,
) -> ProfileResult<impl IntoResponse> {
    let profile = payload.into_model(claims.sub)?;
    let id = service.add(profile).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// List all profiles
///
/// GET /profiles
async fn list_profiles<S: ProfilesStorage>(
    State(service): State<Arc<ProfilesService<S>>>,
) -> ProfileResult<Json<Vec<ProfileResponse>>> {
    let profiles = service.get_all().await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// Search profiles by name and surname prefix
///
/// GET /profiles/search?name=Al&surname=Sm
async fn search_profiles<S: ProfilesStorage>(
    State(service): State<Arc<ProfilesService<S>>>,
    Query(params): Query<SearchParams>,
) -> ProfileResult<Json<Vec<ProfileResponse>>> {
    let profiles = service.search(&params).await?;
    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// Get a profile by id
///
/// GET /profiles/{id}
async fn get_profile<S: ProfilesStorage>(
    State(service): State<Arc<ProfilesService<S>>>,
    Path(id): Path<String>,
) -> ProfileResult<Json<ProfileResponse>> {
    let profile = service.get(&id).await?;
    Ok(Json(profile.into()))
}
