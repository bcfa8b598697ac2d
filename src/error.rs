//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] is the central error type. Socket-side failures are
//! turned into an `error` frame for the offending connection only; REST
//! failures become a structured JSON body with the mapped status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ConnectionId;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "user not found for connection 0b6c…"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Relay error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Inbound frames  | 400 Bad Request           |
/// | 2000–2999 | Not Found       | 404 Not Found             |
/// | 3000–3999 | Server          | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A `join` frame whose payload is missing, malformed, or blank under
    /// strict validation.
    #[error("invalid join payload: {0}")]
    InvalidJoinPayload(String),

    /// A frame that is not JSON or lacks the `event`/`data` envelope.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// A well-formed frame naming an event the relay does not handle.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// No user is registered for the connection.
    #[error("user not found for connection {0}")]
    UserNotFound(ConnectionId),

    /// A configuration value could not be parsed.
    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig {
        /// Environment variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidJoinPayload(_) => 1001,
            Self::MalformedFrame(_) => 1002,
            Self::UnknownEvent(_) => 1003,
            Self::UserNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::InvalidConfig { .. } => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJoinPayload(_) | Self::MalformedFrame(_) | Self::UnknownEvent(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidConfig { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
