//! OpenAPI document for the REST surface.
//!
//! Served as JSON at [`OPENAPI_PATH`]; with the `swagger-ui` feature the
//! interactive UI is mounted at `/swagger-ui` as well.

use axum::Router;
use utoipa::OpenApi;

use super::dto::{RoomSummaryDto, UserDto};
use super::handlers::{room, system};
use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// Path of the generated OpenAPI JSON document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI description of the relay's HTTP endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "chat-relay",
        description = "Real-time chat relay. Chat traffic flows over the `/ws` WebSocket; these endpoints are read-only."
    ),
    paths(
        system::health_handler,
        room::list_rooms,
        room::list_room_users,
        room::get_user,
    ),
    components(schemas(
        system::HealthResponse,
        RoomSummaryDto,
        UserDto,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Service health"),
        (name = "Rooms", description = "Room membership inspection"),
    )
)]
pub struct ApiDoc;

/// Routes serving the OpenAPI document and Swagger UI.
#[cfg(feature = "swagger-ui")]
pub fn docs_router() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

/// Routes serving the OpenAPI document.
#[cfg(not(feature = "swagger-ui"))]
pub fn docs_router() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
