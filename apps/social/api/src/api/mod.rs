use axum::Router;
use axum_helpers::JwtAuth;
use domain_profiles::{ProfilesService, ProfilesStorage};
use domain_users::{AuthService, UsersStorage};

pub mod health;

/// API routes without the `/api` prefix, which `create_router` adds.
///
/// `/register` and `/login` are public; everything under `/profiles` needs a
/// bearer token issued by `/login`.
pub fn routes<U, P>(users: AuthService<U>, profiles: ProfilesService<P>, jwt: JwtAuth) -> Router
where
    U: UsersStorage + 'static,
    P: ProfilesStorage + 'static,
{
    Router::new()
        .merge(domain_users::handlers::router(users, jwt.clone()))
        .nest("/profiles", domain_profiles::handlers::router(profiles, jwt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{JwtConfig, create_router};
    use domain_profiles::InMemoryProfilesStorage;
    use domain_users::InMemoryUsersStorage;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let jwt = JwtAuth::new(&JwtConfig::new("api-test-secret-that-is-32-chars-long"));
        create_router(routes(
            AuthService::new(InMemoryUsersStorage::new()),
            ProfilesService::new(InMemoryProfilesStorage::new()),
            jwt,
        ))
    }

    async fn call(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = if body.is_null() {
            builder.body(Body::empty()).unwrap()
        } else {
            builder.body(Body::from(body.to_string())).unwrap()
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_register_login_then_create_and_read_profile() {
        let app = app();

        let (status, body) = call(
            &app,
            "POST",
            "/api/register",
            None,
            json!({"email": "a@x.com", "login": "alice", "password": "pwd"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "1");

        let (status, body) = call(
            &app,
            "POST",
            "/api/login",
            None,
            json!({"login": "alice", "password": "pwd"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["access_token"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            "POST",
            "/api/profiles",
            Some(&token),
            json!({
                "name": "Alice",
                "surname": "Smith",
                "sex": "female",
                "age": 30,
                "address": "Main st. 1",
                "hobbies": ["chess"]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = call(&app, "GET", &format!("/api/profiles/{}", id), Some(&token), Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], "1");
        assert_eq!(body["hobbies"], json!(["chess"]));
    }

    #[tokio::test]
    async fn test_profiles_require_token() {
        let (status, _) = call(&app(), "GET", "/api/profiles", None, Value::Null).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_with_unknown_user_is_not_found() {
        let (status, _) = call(
            &app(),
            "POST",
            "/api/login",
            None,
            json!({"login": "ghost", "password": "pwd"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
