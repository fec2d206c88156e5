use crate::protocol::identity_from_path;
use crate::server::GameServer;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::sync::Arc;

use super::connection::handle_socket;

/// Hard ceiling enforced by the WebSocket codec. Anything between the
/// configured `websocket.max_message_size` and this ceiling is answered with
/// `MESSAGE_TOO_LARGE` and the connection stays open.
pub const TRANSPORT_MAX_MESSAGE_SIZE: usize = 64 << 20;

/// WebSocket handler for `/ws/{*path}`.
///
/// The last path segment names the participant. Anything other than `A` or
/// `B` is refused before the upgrade.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(path): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(server): State<Arc<GameServer>>,
) -> Response {
    let Some(player) = identity_from_path(&path) else {
        tracing::warn!(client_addr = %addr, %path, "Rejected upgrade with unknown identity");
        return (StatusCode::BAD_REQUEST, "Unknown player identity").into_response();
    };

    let max_message_size = server.config().websocket.max_message_size;
    ws.max_message_size(TRANSPORT_MAX_MESSAGE_SIZE.max(max_message_size))
        .on_upgrade(move |socket| handle_socket(socket, server, player, addr))
}
