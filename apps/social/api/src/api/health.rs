//! Readiness endpoint backed by the storage in use

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::DatabaseConnection;
use serde_json::Value;

/// Router with `/ready`; the in-memory backend has nothing to check
pub fn ready_router(db: Option<DatabaseConnection>) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

async fn ready_handler(State(db): State<Option<DatabaseConnection>>) -> (StatusCode, Json<Value>) {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = db.as_ref() {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string())
            }),
        ));
    }

    run_health_checks(checks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_ready_without_database() {
        let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
        let response = ready_router(None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ready");
    }
}
