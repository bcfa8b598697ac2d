//! Session handling: join, chat message, and disconnect.
//!
//! [`RelaySession`] turns per-connection events into registry updates and
//! outbound fan-out through a [`Transport`]. Every method runs to
//! completion without awaiting.

use std::sync::Arc;

use super::Transport;
use crate::config::{ChatScope, RelayConfig};
use crate::domain::{ConnectionId, ConnectionRegistry, RelayEvent, User};
use crate::error::RelayError;

/// One method per inbound connection event.
pub trait SessionHandler: Send + Sync {
    /// Registers the connection under `name` in `room` and announces it.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidJoinPayload`] when strict validation is
    /// enabled and `name` or `room` is blank.
    fn on_join(&self, conn: ConnectionId, name: String, room: String) -> Result<User, RelayError>;

    /// Relays `text` and returns how many connections it was queued for.
    fn on_chat_message(&self, conn: ConnectionId, text: String) -> usize;

    /// Announces the departure and deregisters the connection. Returns the
    /// removed user, or `None` if the connection never joined.
    fn on_disconnect(&self, conn: ConnectionId) -> Option<User>;
}

/// Policy switches for [`RelaySession`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionPolicy {
    /// Who receives chat messages.
    pub chat_scope: ChatScope,
    /// Reject blank names and rooms on join.
    pub strict_join: bool,
}

impl From<&RelayConfig> for SessionPolicy {
    fn from(config: &RelayConfig) -> Self {
        Self {
            chat_scope: config.chat_scope,
            strict_join: config.strict_join,
        }
    }
}

/// Default [`SessionHandler`] backed by a [`ConnectionRegistry`].
#[derive(Debug, Clone)]
pub struct RelaySession {
    registry: Arc<ConnectionRegistry>,
    transport: Arc<dyn Transport>,
    policy: SessionPolicy,
}

impl RelaySession {
    /// Creates a session handler over the given registry and transport.
    #[must_use]
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        transport: Arc<dyn Transport>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            registry,
            transport,
            policy,
        }
    }

    /// Returns a reference to the inner [`ConnectionRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> SessionPolicy {
        self.policy
    }
}

impl SessionHandler for RelaySession {
    fn on_join(&self, conn: ConnectionId, name: String, room: String) -> Result<User, RelayError> {
        if self.policy.strict_join {
            if name.trim().is_empty() {
                return Err(RelayError::InvalidJoinPayload("name must not be blank".to_string()));
            }
            if room.trim().is_empty() {
                return Err(RelayError::InvalidJoinPayload("room must not be blank".to_string()));
            }
        }

        // A repeated join moves the connection: drop the old subscription
        // quietly before announcing in the new room.
        if let Some(previous) = self.registry.get_user(conn)
            && previous.room != room
        {
            self.transport.leave_room(conn, &previous.room);
            tracing::info!(
                connection_id = %conn,
                from = %previous.room,
                to = %room,
                "user moved rooms"
            );
        }

        let user = self.registry.add_user(conn, name, room);
        self.transport.join_room(conn, &user.room);

        self.transport
            .send_to(conn, &RelayEvent::chat(welcome_message(&user)));
        let announced = self.transport.broadcast_to_room(
            &user.room,
            Some(conn),
            &RelayEvent::chat(joined_message(&user)),
        );

        tracing::info!(
            connection_id = %conn,
            name = %user.name,
            room = %user.room,
            announced,
            "user joined room"
        );
        Ok(user)
    }

    fn on_chat_message(&self, conn: ConnectionId, text: String) -> usize {
        let event = RelayEvent::chat(text);
        let delivered = match self.policy.chat_scope {
            ChatScope::Global => self.transport.broadcast(&event),
            ChatScope::Room => match self.registry.get_user(conn) {
                Some(user) => self.transport.broadcast_to_room(&user.room, None, &event),
                None => {
                    tracing::debug!(connection_id = %conn, "chat from unjoined connection dropped");
                    0
                }
            },
        };
        tracing::debug!(connection_id = %conn, delivered, "chat message relayed");
        delivered
    }

    fn on_disconnect(&self, conn: ConnectionId) -> Option<User> {
        // Removal decides who announces, so a racing second call is a no-op.
        let Some(user) = self.registry.remove_user(conn) else {
            tracing::debug!(connection_id = %conn, "connection closed without a joined user");
            return None;
        };

        let notified = self.transport.broadcast_to_room(
            &user.room,
            Some(conn),
            &RelayEvent::chat(departure_message(&user)),
        );

        tracing::info!(
            connection_id = %conn,
            name = %user.name,
            room = %user.room,
            notified,
            "user left room"
        );
        Some(user)
    }
}

/// Private greeting sent to the joining connection.
#[must_use]
pub fn welcome_message(user: &User) -> String {
    format!("{}, welcome to the room {}.", user.name, user.room)
}

/// Announcement sent to the other occupants of the joined room.
#[must_use]
pub fn joined_message(user: &User) -> String {
    format!("{}, has joined.", user.name)
}

/// Announcement sent to the room a disconnecting user was in.
#[must_use]
pub fn departure_message(user: &User) -> String {
    format!("{} is now offline. Bye !", user.name)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use tokio::sync::mpsc;

    use super::*;
    use crate::ws::hub::RoomHub;

    struct Harness {
        hub: Arc<RoomHub>,
        session: RelaySession,
    }

    impl Harness {
        fn new(policy: SessionPolicy) -> Self {
            let hub = Arc::new(RoomHub::new(32));
            let registry = Arc::new(ConnectionRegistry::new());
            let transport: Arc<dyn Transport> = Arc::<RoomHub>::clone(&hub);
            let session = RelaySession::new(registry, transport, policy);
            Self { hub, session }
        }

        fn connect(&self) -> (ConnectionId, mpsc::Receiver<RelayEvent>) {
            let conn = ConnectionId::new();
            let rx = self.hub.attach(conn);
            (conn, rx)
        }

        fn join(&self, conn: ConnectionId, name: &str, room: &str) {
            if self
                .session
                .on_join(conn, name.to_string(), room.to_string())
                .is_err()
            {
                panic!("join should succeed");
            }
        }

        fn disconnect(&self, conn: ConnectionId) -> Option<User> {
            self.hub.detach(conn);
            self.session.on_disconnect(conn)
        }
    }

    fn drain(rx: &mut mpsc::Receiver<RelayEvent>) -> Vec<RelayEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn lone_join_gets_only_welcome() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, mut rx1) = h.connect();

        h.join(c1, "Alice", "lobby");

        assert_eq!(
            drain(&mut rx1),
            vec![RelayEvent::chat("Alice, welcome to the room lobby.")]
        );
    }

    #[test]
    fn second_join_is_announced_to_first() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, mut rx1) = h.connect();
        let (c2, mut rx2) = h.connect();

        h.join(c1, "Alice", "lobby");
        drain(&mut rx1);
        h.join(c2, "Bob", "lobby");

        assert_eq!(drain(&mut rx1), vec![RelayEvent::chat("Bob, has joined.")]);
        assert_eq!(
            drain(&mut rx2),
            vec![RelayEvent::chat("Bob, welcome to the room lobby.")]
        );
    }

    #[test]
    fn join_is_not_announced_in_other_rooms() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, mut rx1) = h.connect();
        let (c2, _rx2) = h.connect();

        h.join(c1, "Alice", "lobby");
        drain(&mut rx1);
        h.join(c2, "Bob", "kitchen");

        assert!(drain(&mut rx1).is_empty());
    }

    #[test]
    fn chat_is_global_by_default() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, mut rx1) = h.connect();
        let (c2, mut rx2) = h.connect();
        let (c3, mut rx3) = h.connect();
        let (_idle, mut rx_idle) = h.connect();

        h.join(c1, "Alice", "lobby");
        h.join(c2, "Bob", "lobby");
        h.join(c3, "Carol", "kitchen");
        for rx in [&mut rx1, &mut rx2, &mut rx3] {
            drain(rx);
        }

        let delivered = h.session.on_chat_message(c1, "hi".to_string());

        assert_eq!(delivered, 4);
        for rx in [&mut rx1, &mut rx2, &mut rx3, &mut rx_idle] {
            assert_eq!(drain(rx), vec![RelayEvent::chat("hi")]);
        }
    }

    #[test]
    fn room_scoped_chat_stays_in_room() {
        let h = Harness::new(SessionPolicy {
            chat_scope: ChatScope::Room,
            strict_join: false,
        });
        let (c1, mut rx1) = h.connect();
        let (c2, mut rx2) = h.connect();
        let (c3, mut rx3) = h.connect();

        h.join(c1, "Alice", "lobby");
        h.join(c2, "Bob", "lobby");
        h.join(c3, "Carol", "kitchen");
        for rx in [&mut rx1, &mut rx2, &mut rx3] {
            drain(rx);
        }

        assert_eq!(h.session.on_chat_message(c1, "hi".to_string()), 2);
        assert_eq!(drain(&mut rx1), vec![RelayEvent::chat("hi")]);
        assert_eq!(drain(&mut rx2), vec![RelayEvent::chat("hi")]);
        assert!(drain(&mut rx3).is_empty());

        let (stranger, _rx) = h.connect();
        assert_eq!(h.session.on_chat_message(stranger, "psst".to_string()), 0);
    }

    #[test]
    fn disconnect_announces_and_deregisters() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, _rx1) = h.connect();
        let (c2, mut rx2) = h.connect();

        h.join(c1, "Alice", "lobby");
        h.join(c2, "Bob", "lobby");
        drain(&mut rx2);

        let Some(removed) = h.disconnect(c1) else {
            panic!("Alice should have been registered");
        };
        assert_eq!(removed.name, "Alice");
        assert_eq!(
            drain(&mut rx2),
            vec![RelayEvent::chat("Alice is now offline. Bye !")]
        );

        let remaining = h.session.registry().get_users_in_room("lobby");
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|user| user.name == "Bob"));
        assert!(h.session.registry().get_user(c1).is_none());
    }

    #[test]
    fn disconnect_without_join_is_noop() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, mut rx1) = h.connect();
        let (c2, _rx2) = h.connect();
        h.join(c1, "Alice", "lobby");
        drain(&mut rx1);

        assert!(h.disconnect(c2).is_none());
        assert!(drain(&mut rx1).is_empty());
        assert_eq!(h.session.registry().len(), 1);
    }

    #[test]
    fn double_disconnect_is_harmless() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, _rx1) = h.connect();
        h.join(c1, "Alice", "lobby");

        assert!(h.disconnect(c1).is_some());
        assert!(h.disconnect(c1).is_none());
    }

    #[test]
    fn concurrent_disconnects_announce_once() {
        for _ in 0..200 {
            let h = Arc::new(Harness::new(SessionPolicy::default()));
            let (c1, _rx1) = h.connect();
            let (c2, mut rx2) = h.connect();
            h.join(c1, "Alice", "lobby");
            h.join(c2, "Bob", "lobby");
            drain(&mut rx2);

            let barrier = Arc::new(Barrier::new(2));
            let workers: Vec<_> = (0..2)
                .map(|_| {
                    let h = Arc::clone(&h);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        h.session.on_disconnect(c1).is_some()
                    })
                })
                .collect();
            let removed = workers
                .into_iter()
                .map(|worker| worker.join())
                .filter(|joined| matches!(joined, Ok(true)))
                .count();

            assert_eq!(removed, 1);
            assert_eq!(
                drain(&mut rx2),
                vec![RelayEvent::chat("Alice is now offline. Bye !")]
            );
        }
    }

    #[test]
    fn rejoin_moves_rooms() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, mut rx1) = h.connect();
        let (c2, mut rx2) = h.connect();
        let (c3, mut rx3) = h.connect();

        h.join(c1, "Alice", "lobby");
        h.join(c2, "Bob", "lobby");
        h.join(c3, "Carol", "garden");
        for rx in [&mut rx1, &mut rx2, &mut rx3] {
            drain(rx);
        }

        h.join(c1, "Alice", "garden");

        assert!(drain(&mut rx2).is_empty());
        assert_eq!(drain(&mut rx3), vec![RelayEvent::chat("Alice, has joined.")]);
        assert_eq!(
            drain(&mut rx1),
            vec![RelayEvent::chat("Alice, welcome to the room garden.")]
        );
        assert_eq!(h.session.registry().get_users_in_room("lobby").len(), 1);

        // Alice no longer hears lobby traffic.
        h.join(c2, "Bob", "lobby");
        assert!(drain(&mut rx1).is_empty());
    }

    #[test]
    fn lenient_join_accepts_blank_fields() {
        let h = Harness::new(SessionPolicy::default());
        let (c1, mut rx1) = h.connect();

        h.join(c1, "", "");

        assert_eq!(drain(&mut rx1), vec![RelayEvent::chat(", welcome to the room .")]);
    }

    #[test]
    fn strict_join_rejects_blank_fields() {
        let h = Harness::new(SessionPolicy {
            chat_scope: ChatScope::Global,
            strict_join: true,
        });
        let (c1, mut rx1) = h.connect();

        let blank_name = h.session.on_join(c1, "  ".to_string(), "lobby".to_string());
        let Err(RelayError::InvalidJoinPayload(_)) = blank_name else {
            panic!("blank name should be rejected");
        };
        let blank_room = h.session.on_join(c1, "Alice".to_string(), String::new());
        let Err(RelayError::InvalidJoinPayload(_)) = blank_room else {
            panic!("blank room should be rejected");
        };

        assert!(drain(&mut rx1).is_empty());
        assert!(h.session.registry().is_empty());
    }

    #[test]
    fn message_templates() {
        let user = User::new(ConnectionId::new(), "Alice", "lobby");
        assert_eq!(welcome_message(&user), "Alice, welcome to the room lobby.");
        assert_eq!(joined_message(&user), "Alice, has joined.");
        assert_eq!(departure_message(&user), "Alice is now offline. Bye !");
    }
}
