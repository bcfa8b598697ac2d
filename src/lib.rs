//! # chat-relay
//!
//! Real-time chat relay over WebSocket with named rooms.
//!
//! Clients connect to `/ws`, `join` a room under a display name, and send
//! `chat message` frames. Joins and departures are announced to the room;
//! chat text is relayed to every connected client unless `CHAT_SCOPE=room`.
//! Nothing is persisted.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser page at `/`, WebSocket at `/ws`)
//!     │
//!     ├── WS connection loop (ws/)      REST inspection (api/)
//!     │
//!     ├── RelaySession (service/) ── Transport ── RoomHub (ws/)
//!     │
//!     └── ConnectionRegistry (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
