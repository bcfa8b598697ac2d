//! A joined connection's identity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ConnectionId;

/// Identity and room of one joined connection.
///
/// `name` and `room` are caller-supplied and stored as given; they may be
/// empty and need not be unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Connection this user is bound to.
    pub id: ConnectionId,
    /// Display name.
    pub name: String,
    /// Room the user last joined.
    pub room: String,
    /// When the user last joined.
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// Creates a user stamped with the current time.
    #[must_use]
    pub fn new(id: ConnectionId, name: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            room: room.into(),
            joined_at: Utc::now(),
        }
    }
}
