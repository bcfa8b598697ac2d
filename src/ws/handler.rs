//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::ConnectionId;
use crate::service::{RelaySession, SessionHandler};

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let hub = Arc::clone(&state.hub);
    let session: Arc<dyn SessionHandler> = Arc::<RelaySession>::clone(&state.session);

    ws.max_message_size(state.max_message_bytes)
        .on_upgrade(move |socket| async move {
            let conn = ConnectionId::new();
            let outbound_rx = hub.attach(conn);
            run_connection(socket, conn, outbound_rx, hub, session).await;
        })
}
