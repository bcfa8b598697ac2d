//! Room and user DTOs for the inspection endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::User;

/// An occupied room and how many users are in it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomSummaryDto {
    /// Room name.
    pub room: String,
    /// Number of joined users whose current room is this one.
    pub occupants: usize,
}

/// A joined user as exposed over REST.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDto {
    /// Connection the user is bound to.
    pub connection_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Current room.
    pub room: String,
    /// Time of the last join.
    pub joined_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            connection_id: *user.id.as_uuid(),
            name: user.name.clone(),
            room: user.room.clone(),
            joined_at: user.joined_at,
        }
    }
}
