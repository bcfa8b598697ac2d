//! Relay configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Missing or unparsable optional values fall back to their
//! defaults; only an unparsable listen address is an error.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::RelayError;

/// Which connections receive a `chat message`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatScope {
    /// Every connected client, whatever room it joined.
    #[default]
    Global,
    /// Only connections subscribed to the sender's room.
    Room,
}

impl FromStr for ChatScope {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "room" => Ok(Self::Room),
            _ => Err(RelayError::InvalidConfig {
                key: "CHAT_SCOPE",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Room => f.write_str("room"),
        }
    }
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Per-connection outbound queue length. Messages for a connection
    /// whose queue is full are dropped.
    pub outbound_buffer_capacity: usize,

    /// Largest inbound WebSocket message accepted, in bytes.
    pub max_message_bytes: usize,

    /// Timeout in seconds for plain HTTP requests.
    pub http_timeout_secs: u64,

    /// Fan-out scope for chat messages.
    pub chat_scope: ChatScope,

    /// Reject joins with a blank name or room.
    pub strict_join: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            outbound_buffer_capacity: 256,
            max_message_bytes: 64 * 1024,
            http_timeout_secs: 30,
            chat_scope: ChatScope::Global,
            strict_join: false,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidConfig`] if `LISTEN_ADDR` is set but
    /// cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// When `LISTEN_ADDR` is absent the server binds `0.0.0.0:$PORT`,
    /// with `PORT` defaulting to 3000.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidConfig`] if `LISTEN_ADDR` is set but
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr: SocketAddr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw.parse().map_err(|_| RelayError::InvalidConfig {
                key: "LISTEN_ADDR",
                value: raw.clone(),
            })?,
            None => {
                let port = parse_value(&lookup, "PORT", defaults.listen_addr.port());
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        Ok(Self {
            listen_addr,
            outbound_buffer_capacity: parse_value(
                &lookup,
                "OUTBOUND_BUFFER_CAPACITY",
                defaults.outbound_buffer_capacity,
            )
            .max(1),
            max_message_bytes: parse_value(&lookup, "MAX_MESSAGE_BYTES", defaults.max_message_bytes),
            http_timeout_secs: parse_value(&lookup, "HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            chat_scope: parse_value(&lookup, "CHAT_SCOPE", defaults.chat_scope),
            strict_join: parse_bool(&lookup, "STRICT_JOIN", defaults.strict_join),
        })
    }
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_value<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses `key` as a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
