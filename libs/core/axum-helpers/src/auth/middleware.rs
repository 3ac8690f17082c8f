use super::jwt::JwtAuth;
use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware
///
/// Verifies the bearer token and inserts its `JwtClaims` into the request
/// extensions, where handlers read them with `Extension<JwtClaims>`.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/profiles", get(list_profiles))
///     .layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        tracing::debug!("No bearer token in Authorization header");
        return error_response(
            StatusCode::UNAUTHORIZED,
            "No token provided".to_string(),
            ErrorCode::Unauthorized,
        );
    };

    let claims = match auth.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid token".to_string(),
                ErrorCode::Unauthorized,
            );
        }
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtClaims, JwtConfig};
    use axum::{Extension, Router, body::Body, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn whoami(Extension(claims): Extension<JwtClaims>) -> String {
        claims.sub
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route("/me", get(whoami))
            .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("this-is-a-valid-secret-with-32-chars!"))
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), Some("abc.def"));
    }

    #[tokio::test]
    async fn test_valid_token_exposes_claims() {
        let auth = auth();
        let token = auth.create_access_token("7").unwrap();

        let request = Request::builder()
            .uri("/me")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app(auth).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"7");
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let request = Request::builder().uri("/me").body(Body::empty()).unwrap();
        let response = app(auth()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let request = Request::builder()
            .uri("/me")
            .header("authorization", "Bearer nonsense")
            .body(Body::empty())
            .unwrap();
        let response = app(auth()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
