//! WebSocket layer: upgrade, connection loop, frames, and fan-out hub.
//!
//! The endpoint at `/ws` carries JSON event frames in both directions.

pub mod connection;
pub mod handler;
pub mod hub;
pub mod messages;
pub mod subscription;

pub use hub::RoomHub;
