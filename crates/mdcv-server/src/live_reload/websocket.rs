//! WebSocket endpoint pushing reload events to the browser.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::manager::ReloadEvent;
use crate::state::AppState;

/// Upgrade to a WebSocket and stream reload events.
///
/// The route is only mounted when live reload is enabled, but the state
/// is checked again so a stale client gets a clean 404 instead of an
/// upgrade that immediately closes.
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(events) = state.live_reload.as_ref().map(|manager| manager.subscribe()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    ws.on_upgrade(move |socket| forward_reloads(socket, events))
        .into_response()
}

/// Forward reload events until either side disconnects.
async fn forward_reloads(mut socket: WebSocket, mut events: broadcast::Receiver<ReloadEvent>) {
    loop {
        tokio::select! {
            result = events.recv() => {
                let event = match result {
                    Ok(event) => event,
                    // A lagged client missed reloads; have it reload
                    // unconditionally rather than skip the gap.
                    Err(RecvError::Lagged(_)) => ReloadEvent::resync(),
                    Err(RecvError::Closed) => break,
                };

                let Ok(text) = serde_json::to_string(&event) else {
                    break;
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            result = socket.recv() => {
                // The reload client never sends application messages;
                // anything received is keepalive, anything else is a close.
                match result {
                    Some(Ok(_)) => {}
                    _ => break,
                }
            }
        }
    }
}
