//! Router assembly.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::RelayConfig;
use crate::ws::handler::ws_handler;

/// Builds the full application router: static page, REST, docs and `/ws`.
///
/// The request timeout applies to plain HTTP only; upgraded sockets are
/// not subject to it.
pub fn build_app(state: AppState, config: &RelayConfig) -> Router {
    let http = api::build_router().layer(http_timeout(config));

    Router::new()
        .merge(http)
        .merge(api::openapi::docs_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Request timeout for the plain HTTP routes; expiry answers `408`.
fn http_timeout(config: &RelayConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.http_timeout_secs),
    )
}
