use crate::game::Player;
use crate::protocol::ServerMessage;
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;

pub(super) async fn send_text_message(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
    player: Player,
) -> Result<(), ()> {
    if sender
        .send(Message::Text(message.to_json().into()))
        .await
        .is_err()
    {
        tracing::warn!(%player, "Failed to send message, connection closed");
        return Err(());
    }

    Ok(())
}
