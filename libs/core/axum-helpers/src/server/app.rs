use crate::errors::handlers::not_found;
use super::health::health_router;
use super::shutdown::shutdown_signal;
use axum::Router;
use core_config::server::ServerConfig;
use std::io;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Combines API routes with cross-cutting concerns.
///
/// - `/health` liveness endpoint
/// - API routes nested under `/api`
/// - Request tracing
/// - JSON 404 fallback
///
/// `apis` must already have its state applied.
pub fn create_router(apis: Router) -> Router {
    Router::new()
        .merge(health_router())
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Serves `router` until Ctrl+C/SIGTERM, then runs `cleanup`.
///
/// In-flight requests are drained before `cleanup` starts; `cleanup` gets at
/// most `server_config.shutdown_timeout` to finish (closing database pools and the like).
///
/// ```ignore
/// create_app(router, &config, async move {
///     db.close().await.ok();
/// })
/// .await?;
/// ```
pub async fn create_app<F>(router: Router, server_config: &ServerConfig, cleanup: F) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    let shutdown_timeout = server_config.shutdown_timeout;
    info!("Running cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Router::new().route("/ping", get(|| async { "pong" })))
    }

    #[tokio::test]
    async fn test_api_routes_are_nested() {
        let request = Request::builder().uri("/api/ping").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
