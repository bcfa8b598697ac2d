//! Fan-out primitives the session handler relies on.
//!
//! [`Transport`] is the seam between the session logic and the socket
//! layer. All methods are fire-and-forget: they enqueue and return the
//! number of connections the event was queued for, without waiting for
//! delivery.

use std::fmt::Debug;

use crate::domain::{ConnectionId, RelayEvent};

/// Outbound delivery and room subscription for live connections.
pub trait Transport: Debug + Send + Sync {
    /// Queues `event` for a single connection.
    fn send_to(&self, conn: ConnectionId, event: &RelayEvent) -> bool;

    /// Queues `event` for every live connection.
    fn broadcast(&self, event: &RelayEvent) -> usize;

    /// Queues `event` for every connection subscribed to `room`, skipping
    /// `except` when given.
    fn broadcast_to_room(
        &self,
        room: &str,
        except: Option<ConnectionId>,
        event: &RelayEvent,
    ) -> usize;

    /// Subscribes `conn` to future broadcasts for `room`.
    fn join_room(&self, conn: ConnectionId, room: &str);

    /// Removes `conn` from `room`'s broadcasts.
    fn leave_room(&self, conn: ConnectionId, room: &str);
}
