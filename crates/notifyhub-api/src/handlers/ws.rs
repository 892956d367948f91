//! WebSocket session handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use crate::state::AppState;

/// GET /ws — WebSocket upgrade.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Runs one client session: register, pump messages, clean up once.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Registration into both registries is one step; the client starts
    // with an empty subscription set.
    let (handle, mut outbound_rx) = state.engine.connections.register();
    let conn_id = handle.id;

    // Forward queued notifications to the socket until the queue closes
    // or a write fails.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Inbound control loop; suspends awaiting the next frame
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.engine.connections.handle_inbound(&conn_id, text.as_str());
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket read error");
                break;
            }
        }
    }

    // Cleanup; unregister is latched, so a dispatch-side removal that
    // already happened makes this a no-op
    outbound_task.abort();
    state.engine.connections.unregister(&conn_id);

    info!(conn_id = %conn_id, "WebSocket session closed");
}
