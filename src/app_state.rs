//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::domain::ConnectionRegistry;
use crate::service::{RelaySession, SessionPolicy, Transport};
use crate::ws::RoomHub;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Joined users by connection.
    pub registry: Arc<ConnectionRegistry>,
    /// Live connections and their room subscriptions.
    pub hub: Arc<RoomHub>,
    /// Session handler shared by every connection.
    pub session: Arc<RelaySession>,
    /// Largest inbound WebSocket message accepted, in bytes.
    pub max_message_bytes: usize,
}

impl AppState {
    /// Wires a fresh registry, hub and session handler from `config`.
    #[must_use]
    pub fn new(config: &RelayConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = Arc::new(RoomHub::new(config.outbound_buffer_capacity));
        let transport: Arc<dyn Transport> = Arc::<RoomHub>::clone(&hub);
        let session = Arc::new(RelaySession::new(
            Arc::clone(&registry),
            transport,
            SessionPolicy::from(config),
        ));

        Self {
            registry,
            hub,
            session,
            max_message_bytes: config.max_message_bytes,
        }
    }
}
