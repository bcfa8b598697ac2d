//! In-memory mapping from connection to joined user.
//!
//! [`ConnectionRegistry`] is the sole owner of [`User`] records. Every
//! operation takes a single coarse lock and completes without awaiting,
//! so it is safe to call from the synchronous session handlers running on
//! any tokio worker thread.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use super::{ConnectionId, User};

/// Registry of joined users keyed by [`ConnectionId`].
///
/// # Concurrency
///
/// A single [`RwLock`] serializes `add_user`/`remove_user` against all
/// readers. A poisoned lock is recovered rather than propagated, since a
/// panic elsewhere cannot leave the map half-updated.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    users: RwLock<HashMap<ConnectionId, User>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a user for `id` and returns a copy of it.
    ///
    /// An existing entry for the same connection is replaced.
    pub fn add_user(
        &self,
        id: ConnectionId,
        name: impl Into<String>,
        room: impl Into<String>,
    ) -> User {
        let user = User::new(id, name, room);
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = users.insert(id, user.clone()) {
            tracing::debug!(connection_id = %id, previous_room = %previous.room, "user entry replaced");
        }
        user
    }

    /// Removes and returns the user for `id`, or `None` if it never joined.
    pub fn remove_user(&self, id: ConnectionId) -> Option<User> {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    /// Returns the user for `id`, if any.
    #[must_use]
    pub fn get_user(&self, id: ConnectionId) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Returns every user whose room equals `room`, in no particular order.
    #[must_use]
    pub fn get_users_in_room(&self, room: &str) -> Vec<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|user| user.room == room)
            .cloned()
            .collect()
    }

    /// Returns occupied rooms with their occupant counts, sorted by name.
    #[must_use]
    pub fn rooms(&self) -> BTreeMap<String, usize> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        let mut rooms = BTreeMap::new();
        for user in users.values() {
            *rooms.entry(user.room.clone()).or_insert(0_usize) += 1;
        }
        rooms
    }

    /// Returns the number of joined users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nobody has joined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
