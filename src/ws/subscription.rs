//! Per-connection room subscriptions.
//!
//! Tracks which rooms a WebSocket client receives room-scoped broadcasts
//! for. Global broadcasts ignore subscriptions entirely.

use std::collections::HashSet;

/// The set of rooms a single connection is subscribed to.
#[derive(Debug, Default)]
pub struct RoomSubscriptions {
    rooms: HashSet<String>,
}

impl RoomSubscriptions {
    /// Creates an empty subscription set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `room`. Returns `false` if already subscribed.
    pub fn subscribe(&mut self, room: &str) -> bool {
        self.rooms.insert(room.to_string())
    }

    /// Unsubscribes from `room`. Returns `false` if not subscribed.
    pub fn unsubscribe(&mut self, room: &str) -> bool {
        self.rooms.remove(room)
    }

    /// Returns `true` if room-scoped events for `room` should be delivered.
    #[must_use]
    pub fn matches(&self, room: &str) -> bool {
        self.rooms.contains(room)
    }

    /// Returns the number of subscribed rooms.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rooms.len()
    }
}
