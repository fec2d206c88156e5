use crate::game::Player;
use crate::protocol::{FrameError, ServerMessage};
use crate::server::GameServer;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::sending::send_text_message;

pub(super) async fn handle_socket(
    socket: WebSocket,
    server: Arc<GameServer>,
    player: Player,
    addr: SocketAddr,
) {
    let (mut sender, mut receiver) = socket.split();
    let queue_capacity = server.config().websocket.outbound_queue_capacity.max(1);
    let (tx, mut rx) = mpsc::channel::<Arc<ServerMessage>>(queue_capacity);

    // The registry holds the only sender; replacing the session closes `rx`.
    let connection_id = server.connect(player, tx).await;
    tracing::info!(%player, %connection_id, client_addr = %addr, "WebSocket connection established");

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if send_text_message(&mut sender, &message, player)
                .await
                .is_err()
            {
                return;
            }
        }
        // Queue closed: superseded by a newer connection for this identity.
        tracing::info!(%player, %connection_id, "Closing superseded connection");
        let _ = sender.close().await;
    });

    let server_clone = server.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(%player, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    server_clone
                        .handle_client_text(player, connection_id, text.as_str())
                        .await;
                }
                Message::Binary(_) => {
                    server_clone.reject_frame(player, connection_id, &FrameError::Binary);
                }
                Message::Close(_) => {
                    tracing::info!(%player, "WebSocket connection closed");
                    break;
                }
                _ => {
                    // Ping/pong are answered by the transport.
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            tracing::debug!(%player, "Send task completed");
            receive_task.abort();
        }
        _ = &mut receive_task => {
            tracing::debug!(%player, "Receive task completed");
            send_task.abort();
        }
    }

    server.disconnect(player, connection_id);
}
