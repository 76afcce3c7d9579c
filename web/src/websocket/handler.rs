use crate::extract::Path;
use crate::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, Stream, StreamExt};
use log::*;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use ws::chat;
use ws::connection::ClientId;
use ws::Manager;

/// Upgrades `/ws/{client_id}` into a chat and notification socket.
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(client_id): Path<i64>,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    debug!("Upgrading WebSocket for client {client_id}");

    let manager = Arc::clone(&app_state.ws_manager);
    let send_timeout = app_state.config().ws_send_timeout();

    ws.on_upgrade(move |socket: WebSocket| {
        let (sink, stream) = socket.split();
        run_session(sink, stream, ClientId(client_id), manager, send_timeout)
    })
}

/// Drives one socket from registration to departure.
///
/// A writer task drains the channel's queue into `sink`, giving up after a
/// failed or timed-out write. The reader echoes and broadcasts every text
/// frame. Whichever side finishes first ends the session.
pub(crate) async fn run_session<W, R, E>(
    mut sink: W,
    mut stream: R,
    client_id: ClientId,
    manager: Arc<Manager>,
    send_timeout: Duration,
) where
    W: Sink<Message> + Unpin + Send + 'static,
    W::Error: Display + Send,
    R: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
    E: Display + Send + 'static,
{
    let (connection_id, mut outbound) = manager.open_channel(client_id);

    let mut writer = tokio::spawn(async move {
        while let Some(text) = outbound.recv().await {
            match timeout(send_timeout, sink.send(Message::Text(text.into()))).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    debug!("WebSocket send failed on connection {connection_id}: {e}");
                    break;
                }
                Err(_) => {
                    warn!(
                        "WebSocket send on connection {connection_id} timed out after {send_timeout:?}"
                    );
                    break;
                }
            }
        }
    });

    chat::joined(&manager, client_id);

    let reader_manager = Arc::clone(&manager);
    let mut reader = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    debug!("Received from client {client_id}: {}", text.as_str());
                    chat::said(&reader_manager, connection_id, client_id, text.as_str());
                }
                Ok(Message::Close(_)) => {
                    debug!("Client {client_id} sent close frame");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("WebSocket receive failed on connection {connection_id}: {e}");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    manager.unregister_connection(&connection_id);
    chat::left(&manager, client_id);

    info!("WebSocket connection {connection_id} for client {client_id} closed");
}
