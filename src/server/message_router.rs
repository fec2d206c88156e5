use crate::game::Player;
use crate::protocol::{ClientMessage, ErrorCode, FrameError};

use super::{ConnectionId, GameServer};

impl GameServer {
    /// Handle one inbound text frame from `player`'s connection.
    ///
    /// Every failure is answered with an error frame on the originating
    /// connection only; nothing here closes the connection.
    pub async fn handle_client_text(&self, player: Player, connection_id: ConnectionId, text: &str) {
        let max_size = self.config().websocket.max_message_size;
        if text.len() > max_size {
            tracing::warn!(%player, size = text.len(), max = max_size, "Message exceeds size limit");
            self.reject_frame(
                player,
                connection_id,
                &FrameError::TooLarge {
                    size: text.len(),
                    max: max_size,
                },
            );
            return;
        }

        let message = match ClientMessage::decode(text) {
            Ok(message) => message,
            Err(err) => {
                self.reject_frame(player, connection_id, &err);
                return;
            }
        };

        if message.player.as_deref() != Some(player.as_str()) {
            tracing::warn!(
                %player,
                claimed = ?message.player,
                "Declared player does not match connection identity"
            );
            self.reply_error(player, connection_id, ErrorCode::IdentityMismatch);
            return;
        }

        let command = match message.command() {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!(%player, error = %err, "Rejected move format");
                self.metrics().increment_moves_rejected();
                self.reply_error(player, connection_id, ErrorCode::InvalidMoveFormat);
                return;
            }
        };

        if let Err(err) = self.submit_move(player, &command).await {
            let code = ErrorCode::from(&err);
            if code.is_reported() {
                self.reply_error(player, connection_id, code);
            } else {
                tracing::debug!(%player, %command, "Ignoring move after game over");
            }
        }
    }

    /// Answer a frame that could not be decoded.
    pub fn reject_frame(&self, player: Player, connection_id: ConnectionId, err: &FrameError) {
        tracing::warn!(%player, error = %err, "Rejected client WebSocket frame");
        self.metrics().increment_frame_errors();
        self.reply_error(player, connection_id, err.error_code());
    }

    fn reply_error(&self, player: Player, connection_id: ConnectionId, code: ErrorCode) {
        self.sessions()
            .send_error_to_connection(player, connection_id, code);
    }
}
