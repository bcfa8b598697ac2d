//! HTTP layer: route handlers, DTOs, OpenAPI, and router composition.
//!
//! Inspection endpoints are mounted under `/api/v1`; the chat page and
//! health check live at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the router with every plain HTTP endpoint.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
