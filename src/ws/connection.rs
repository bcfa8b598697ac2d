//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching inbound frames to the session handler and draining the
//! connection's outbound queue to the socket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::hub::RoomHub;
use super::messages::{ClientEvent, JoinPayload};
use crate::domain::{ConnectionId, RelayEvent};
use crate::service::SessionHandler;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads frames from the client and dispatches them.
/// - Forwards events queued for this connection by the [`RoomHub`].
///
/// When the socket closes the connection is detached from the hub first,
/// then the session handler's disconnect runs.
pub async fn run_connection(
    socket: WebSocket,
    conn: ConnectionId,
    mut outbound_rx: mpsc::Receiver<RelayEvent>,
    hub: Arc<RoomHub>,
    session: Arc<dyn SessionHandler>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    tracing::info!(connection_id = %conn, "a user connected");

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_text_message(&text, conn, session.as_ref())
                            && send_event(&mut ws_tx, &reply).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(connection_id = %conn, error = %err, "ws read failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Event queued by the hub
            event = outbound_rx.recv() => {
                match event {
                    Some(event) => {
                        if send_event(&mut ws_tx, &event).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    hub.detach(conn);
    session.on_disconnect(conn);
    tracing::info!(connection_id = %conn, "ws connection closed");
}

/// Handles a text frame from the client, returning an error event to send
/// back to it when the frame is rejected.
fn handle_text_message(
    text: &str,
    conn: ConnectionId,
    session: &dyn SessionHandler,
) -> Option<RelayEvent> {
    let result = ClientEvent::parse(text).and_then(|event| match event {
        ClientEvent::Join(JoinPayload { name, room }) => session.on_join(conn, name, room).map(|_| ()),
        ClientEvent::ChatMessage(text) => {
            session.on_chat_message(conn, text);
            Ok(())
        }
    });

    match result {
        Ok(()) => None,
        Err(err) => {
            tracing::debug!(connection_id = %conn, error = %err, "inbound frame rejected");
            Some(RelayEvent::error(&err))
        }
    }
}

async fn send_event<S>(ws_tx: &mut S, event: &RelayEvent) -> Result<(), S::Error>
where
    S: Sink<Message> + Unpin,
{
    let json = serde_json::to_string(event).unwrap_or_default();
    ws_tx.send(Message::text(json)).await
}
