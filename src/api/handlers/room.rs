//! Read-only room and user inspection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{RoomSummaryDto, UserDto};
use crate::app_state::AppState;
use crate::domain::ConnectionId;
use crate::error::{ErrorResponse, RelayError};

/// `GET /rooms` — List occupied rooms.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    summary = "List occupied rooms",
    description = "Returns every room with at least one joined user, sorted by name.",
    responses(
        (status = 200, description = "Occupied rooms", body = Vec<RoomSummaryDto>),
    )
)]
pub async fn list_rooms(State(state): State<AppState>) -> impl IntoResponse {
    let rooms: Vec<RoomSummaryDto> = state
        .registry
        .rooms()
        .into_iter()
        .map(|(room, occupants)| RoomSummaryDto { room, occupants })
        .collect();
    (StatusCode::OK, Json(rooms))
}

/// `GET /rooms/{room}/users` — List the users in a room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room}/users",
    tag = "Rooms",
    summary = "List users in a room",
    description = "Returns the users currently joined to the room, earliest join first. An unoccupied room yields an empty list.",
    params(("room" = String, Path, description = "Room name")),
    responses(
        (status = 200, description = "Users in the room", body = Vec<UserDto>),
    )
)]
pub async fn list_room_users(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> impl IntoResponse {
    let mut users = state.registry.get_users_in_room(&room);
    users.sort_by_key(|user| user.joined_at);
    let users: Vec<UserDto> = users.iter().map(UserDto::from).collect();
    (StatusCode::OK, Json(users))
}

/// `GET /users/{connection_id}` — Look up the user behind a connection.
///
/// # Errors
///
/// Returns [`RelayError::UserNotFound`] if the connection has not joined.
#[utoipa::path(
    get,
    path = "/api/v1/users/{connection_id}",
    tag = "Rooms",
    summary = "Get a joined user",
    params(("connection_id" = uuid::Uuid, Path, description = "Connection identifier")),
    responses(
        (status = 200, description = "The joined user", body = UserDto),
        (status = 404, description = "Connection has not joined", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(connection_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, RelayError> {
    let id = ConnectionId::from_uuid(connection_id);
    let user = state
        .registry
        .get_user(id)
        .ok_or(RelayError::UserNotFound(id))?;
    Ok((StatusCode::OK, Json(UserDto::from(&user))))
}

/// Room routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/rooms/{room}/users", get(list_room_users))
        .route("/users/{connection_id}", get(get_user))
}
