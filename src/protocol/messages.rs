use serde::{Deserialize, Serialize};
use std::fmt;

use super::error_codes::ErrorCode;
use crate::game::{GameSnapshot, MoveCommand, MoveFormatError};

/// Move request sent by a client: `{ "player": "A", "move": "H1:F" }`.
///
/// Both fields are optional at decode time so that a missing `player` is
/// reported as an identity mismatch and a missing `move` as a format error,
/// rather than as undecodable JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub move_: Option<String>,
}

impl ClientMessage {
    pub fn new(player: impl Into<String>, mv: impl Into<String>) -> Self {
        Self {
            player: Some(player.into()),
            move_: Some(mv.into()),
        }
    }

    /// Decode a text frame. Only non-object JSON and syntax errors fail here;
    /// non-string field values are treated as absent.
    pub fn decode(text: &str) -> Result<Self, FrameError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(FrameError::InvalidJson)?;
        let object = value.as_object().ok_or(FrameError::NotAnObject)?;

        let field = |name: &str| {
            object
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };

        Ok(Self {
            player: field("player"),
            move_: field("move"),
        })
    }

    /// Parse the `move` field.
    pub fn command(&self) -> Result<MoveCommand, MoveFormatError> {
        self.move_
            .as_deref()
            .ok_or_else(|| MoveFormatError(String::new()))?
            .parse()
    }
}

/// Reasons an inbound frame is refused before it reaches the game.
#[derive(Debug)]
pub enum FrameError {
    InvalidJson(serde_json::Error),
    NotAnObject,
    Binary,
    TooLarge { size: usize, max: usize },
}

impl FrameError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TooLarge { .. } => ErrorCode::MessageTooLarge,
            Self::InvalidJson(_) | Self::NotAnObject | Self::Binary => ErrorCode::InvalidJson,
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid json: {err}"),
            Self::NotAnObject => write!(f, "message is not an object"),
            Self::Binary => write!(f, "binary frames are not supported"),
            Self::TooLarge { size, max } => write!(f, "message of {size} bytes exceeds {max}"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Frames sent from server to client. Untagged: a state frame is the bare
/// snapshot object, an error frame carries an `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    State(GameSnapshot),
    Error {
        error: String,
        error_code: ErrorCode,
    },
}

impl ServerMessage {
    pub fn error(code: ErrorCode) -> Self {
        Self::Error {
            error: code.message().to_string(),
            error_code: code,
        }
    }

    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize server message");
                "{\"error\":\"Internal error\",\"error_code\":\"INTERNAL_ERROR\"}".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameState};

    #[test]
    fn decodes_well_formed_request() {
        let msg = ClientMessage::decode(r#"{"player":"A","move":"H1:F"}"#).unwrap();
        assert_eq!(msg, ClientMessage::new("A", "H1:F"));
        let command = msg.command().unwrap();
        assert_eq!(command.character, "H1");
        assert_eq!(command.direction, Direction::F);
    }

    #[test]
    fn missing_fields_decode_as_absent() {
        let msg = ClientMessage::decode(r#"{"player":"B"}"#).unwrap();
        assert_eq!(msg.move_, None);
        assert!(msg.command().is_err());

        let msg = ClientMessage::decode(r#"{"player":7,"move":"P1:L"}"#).unwrap();
        assert_eq!(msg.player, None);
    }

    #[test]
    fn rejects_non_json_and_non_objects() {
        let err = ClientMessage::decode("not json").unwrap_err();
        assert!(matches!(err, FrameError::InvalidJson(_)));
        assert_eq!(err.error_code(), ErrorCode::InvalidJson);

        let err = ClientMessage::decode("[1,2]").unwrap_err();
        assert!(matches!(err, FrameError::NotAnObject));
    }

    #[test]
    fn error_frame_uses_flat_schema() {
        let json = ServerMessage::error(ErrorCode::NotYourTurn).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], "It's not your turn!");
        assert_eq!(value["error_code"], "NOT_YOUR_TURN");
        assert!(value.get("board").is_none());
    }

    #[test]
    fn state_frame_round_trips_through_untagged_enum() {
        let snapshot = GameSnapshot::from(&GameState::default());
        let json = ServerMessage::State(snapshot.clone()).to_json();
        let decoded: ServerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, ServerMessage::State(snapshot));

        let decoded: ServerMessage =
            serde_json::from_str(&ServerMessage::error(ErrorCode::MoveFailed).to_json()).unwrap();
        assert!(matches!(decoded, ServerMessage::Error { error_code: ErrorCode::MoveFailed, .. }));
    }
}
