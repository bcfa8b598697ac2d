//! System endpoints: health check and the chat page.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the server answers.
    pub status: String,
    /// Current server time, RFC 3339.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Live WebSocket connections.
    pub connections: usize,
    /// Connections that have joined a room.
    pub joined: usize,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and connection counts.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            connections: state.hub.connection_count(),
            joined: state.registry.len(),
        }),
    )
}

/// `GET /` — The browser chat client.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::app_state::AppState;
    use crate::config::RelayConfig;
    use crate::server::build_app;

    #[tokio::test]
    async fn health_reports_counts() {
        let config = RelayConfig::default();
        let state = AppState::new(&config);
        let _rx = state.hub.attach(crate::domain::ConnectionId::new());
        let app = build_app(state, &config);

        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("request should build");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should be readable");
        };
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or_default();
        assert_eq!(json.get("status"), Some(&serde_json::json!("healthy")));
        assert_eq!(json.get("connections"), Some(&serde_json::json!(1)));
        assert_eq!(json.get("joined"), Some(&serde_json::json!(0)));
    }

    #[tokio::test]
    async fn index_serves_html() {
        let config = RelayConfig::default();
        let app = build_app(AppState::new(&config), &config);

        let Ok(request) = Request::builder().uri("/").body(Body::empty()) else {
            panic!("request should build");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"));
    }
}
