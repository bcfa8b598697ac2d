//! Outbound events delivered to connected clients.
//!
//! A [`RelayEvent`] is what the session handler hands to the transport.
//! It serializes to the JSON text frame written on the socket.

use serde::Serialize;

use crate::error::RelayError;

/// Event name carried by every chat frame, inbound and outbound.
pub const CHAT_MESSAGE_EVENT: &str = "chat message";

/// Event name for joining a room.
pub const JOIN_EVENT: &str = "join";

/// Event sent from the server to one or more connections.
///
/// Serialized as `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum RelayEvent {
    /// Plain chat text: user messages, welcomes and room announcements.
    #[serde(rename = "chat message")]
    ChatMessage(String),

    /// A rejected inbound frame, sent only to its sender.
    #[serde(rename = "error")]
    Error {
        /// Numeric error code (see [`RelayError::error_code`]).
        code: u32,
        /// Human-readable message.
        message: String,
    },
}

impl RelayEvent {
    /// Builds a chat message event.
    #[must_use]
    pub fn chat(text: impl Into<String>) -> Self {
        Self::ChatMessage(text.into())
    }

    /// Builds an error event from a [`RelayError`].
    #[must_use]
    pub fn error(err: &RelayError) -> Self {
        Self::Error {
            code: err.error_code(),
            message: err.to_string(),
        }
    }

    /// Returns the event name as it appears on the wire.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::ChatMessage(_) => CHAT_MESSAGE_EVENT,
            Self::Error { .. } => "error",
        }
    }
}
