//! In-process fan-out hub for live WebSocket connections.
//!
//! [`RoomHub`] owns one bounded outbound queue per connection together
//! with that connection's [`RoomSubscriptions`]. It implements
//! [`Transport`], so the session handler never touches sockets directly.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::subscription::RoomSubscriptions;
use crate::domain::{ConnectionId, RelayEvent};
use crate::service::Transport;

#[derive(Debug)]
struct Peer {
    sender: mpsc::Sender<RelayEvent>,
    subscriptions: RoomSubscriptions,
}

/// Registry of live connections and their room subscriptions.
///
/// Delivery uses `try_send`: a full queue drops the event for that
/// connection only, and a closed queue is skipped.
#[derive(Debug)]
pub struct RoomHub {
    peers: RwLock<HashMap<ConnectionId, Peer>>,
    capacity: usize,
}

impl RoomHub {
    /// Creates a hub whose per-connection queues hold `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            peers: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Registers a connection and returns the receiving half of its queue.
    ///
    /// Attaching an id that is already live replaces its queue and clears
    /// its subscriptions.
    pub fn attach(&self, conn: ConnectionId) -> mpsc::Receiver<RelayEvent> {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let peer = Peer {
            sender,
            subscriptions: RoomSubscriptions::new(),
        };
        self.peers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(conn, peer);
        tracing::debug!(connection_id = %conn, "connection attached");
        receiver
    }

    /// Forgets a connection and all of its subscriptions.
    pub fn detach(&self, conn: ConnectionId) -> bool {
        let removed = self
            .peers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&conn)
            .is_some();
        if removed {
            tracing::debug!(connection_id = %conn, "connection detached");
        }
        removed
    }

    /// Returns the number of live connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.peers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the number of live connections subscribed to `room`.
    #[must_use]
    pub fn subscriber_count(&self, room: &str) -> usize {
        self.peers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|peer| peer.subscriptions.matches(room))
            .count()
    }

    fn deliver(conn: ConnectionId, peer: &Peer, event: &RelayEvent) -> bool {
        match peer.sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    connection_id = %conn,
                    event = event.event_name(),
                    "outbound queue full, dropping event"
                );
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

impl Transport for RoomHub {
    fn send_to(&self, conn: ConnectionId, event: &RelayEvent) -> bool {
        let peers = self.peers.read().unwrap_or_else(PoisonError::into_inner);
        peers
            .get(&conn)
            .is_some_and(|peer| Self::deliver(conn, peer, event))
    }

    fn broadcast(&self, event: &RelayEvent) -> usize {
        let peers = self.peers.read().unwrap_or_else(PoisonError::into_inner);
        peers
            .iter()
            .filter(|(conn, peer)| Self::deliver(**conn, peer, event))
            .count()
    }

    fn broadcast_to_room(
        &self,
        room: &str,
        except: Option<ConnectionId>,
        event: &RelayEvent,
    ) -> usize {
        let peers = self.peers.read().unwrap_or_else(PoisonError::into_inner);
        peers
            .iter()
            .filter(|(conn, peer)| Some(**conn) != except && peer.subscriptions.matches(room))
            .filter(|(conn, peer)| Self::deliver(**conn, peer, event))
            .count()
    }

    fn join_room(&self, conn: ConnectionId, room: &str) {
        let mut peers = self.peers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(peer) = peers.get_mut(&conn) {
            peer.subscriptions.subscribe(room);
        }
    }

    fn leave_room(&self, conn: ConnectionId, room: &str) {
        let mut peers = self.peers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(peer) = peers.get_mut(&conn) {
            peer.subscriptions.unsubscribe(room);
        }
    }
}
