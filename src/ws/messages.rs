//! Inbound WebSocket frames.
//!
//! Clients send JSON text frames of the form
//! `{"event": "<name>", "data": <payload>}`. Outbound frames share the
//! same envelope, see [`crate::domain::RelayEvent`].

use serde::Deserialize;

use crate::domain::relay_event::{CHAT_MESSAGE_EVENT, JOIN_EVENT};
use crate::error::RelayError;

/// Top-level frame envelope, before the payload is interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    /// Event name.
    pub event: String,
    /// Event-specific payload; `null` when absent.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payload of a `join` frame. Missing fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JoinPayload {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Room to join.
    #[serde(default)]
    pub room: String,
}

/// A decoded client event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Join (or move to) a room.
    Join(JoinPayload),
    /// Text to relay.
    ChatMessage(String),
}

impl ClientEvent {
    /// Decodes a text frame.
    ///
    /// # Errors
    ///
    /// - [`RelayError::MalformedFrame`] if the text is not a JSON envelope or
    ///   a `chat message` payload is not a string.
    /// - [`RelayError::InvalidJoinPayload`] if a `join` payload is not an
    ///   object with string fields.
    /// - [`RelayError::UnknownEvent`] for any other event name.
    pub fn parse(text: &str) -> Result<Self, RelayError> {
        let frame: Frame =
            serde_json::from_str(text).map_err(|e| RelayError::MalformedFrame(e.to_string()))?;

        match frame.event.as_str() {
            JOIN_EVENT => serde_json::from_value(frame.data)
                .map(Self::Join)
                .map_err(|e| RelayError::InvalidJoinPayload(e.to_string())),
            CHAT_MESSAGE_EVENT => match frame.data {
                serde_json::Value::String(text) => Ok(Self::ChatMessage(text)),
                other => Err(RelayError::MalformedFrame(format!(
                    "chat message payload must be a string, got {other}"
                ))),
            },
            _ => Err(RelayError::UnknownEvent(frame.event)),
        }
    }
}
