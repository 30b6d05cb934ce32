//! WebSocket endpoint for the real-time channel.
//!
//! `GET /ws` upgrades an authenticated request to a WebSocket. The socket's
//! lifetime drives presence: registering on open and removing on close,
//! each followed by an `online_status_update` broadcast to everyone.
//!
//! Outbound events reach the socket through an unbounded mpsc channel whose
//! sending half lives in the presence registry; the routing layer never
//! touches the transport directly.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::messaging::router::send_direct_message;
use crate::middleware::auth::AuthUser;
use crate::realtime::events::InboundEvent;
use crate::realtime::presence::ClientHandle;
use crate::server::state::AppState;

/// Upgrade handler for `GET /ws`. Runs behind the auth middleware, so the
/// session cookie on the upgrade request identifies the user.
pub async fn ws_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ws: WebSocketUpgrade,
) -> Response {
    let user_id = user.user_id;
    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

async fn handle_socket(socket: WebSocket, state: AppState, user_id: Uuid) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let connection_id = Uuid::new_v4();

    state
        .presence
        .connect(user_id, ClientHandle::new(connection_id, event_tx));
    state.presence.broadcast_online_status();

    // Forward queued outbound events onto the wire.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(text) => {
                    if ws_tx.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!("Failed to serialize outbound event: {e}"),
            }
        }
    });

    // Process inbound frames until the peer goes away.
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = ws_rx.next().await {
            match frame {
                Message::Text(text) => {
                    handle_inbound_frame(&recv_state, user_id, text.as_str()).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // A stale connection that was already replaced removes nothing, and
    // then the online set did not change.
    if state.presence.disconnect(connection_id) {
        state.presence.broadcast_online_status();
    }
}

/// Dispatch one inbound frame from `sender_id`.
///
/// The channel is best-effort: malformed frames and routing failures are
/// logged and dropped without tearing down the connection.
pub async fn handle_inbound_frame(state: &AppState, sender_id: Uuid, text: &str) {
    let event: InboundEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from {sender_id}: {e}");
            return;
        }
    };

    match event {
        InboundEvent::PrivateMessage {
            recipient_id,
            content,
            is_media,
        } => {
            if let Err(e) = send_direct_message(
                &state.db,
                &state.presence,
                sender_id,
                recipient_id,
                &content,
                is_media,
            )
            .await
            {
                tracing::error!("Failed to route message from {sender_id}: {e}");
            }
        }
    }
}
