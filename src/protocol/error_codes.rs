use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::MoveError;

/// Error codes attached to every error frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Frame errors
    InvalidJson,
    MessageTooLarge,
    IdentityMismatch,

    // Move errors
    InvalidMoveFormat,
    NotYourTurn,
    PieceNotFound,
    MoveFailed,
    GameAlreadyOver,

    // Server errors
    InternalError,
}

impl ErrorCode {
    /// Short message sent in the `error` field of an error frame.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "Invalid JSON format.",
            Self::MessageTooLarge => "Message too large.",
            Self::IdentityMismatch => "Invalid player ID.",
            Self::InvalidMoveFormat => "Invalid move format.",
            Self::NotYourTurn => "It's not your turn!",
            Self::PieceNotFound | Self::MoveFailed => {
                "Move failed. Either character not found or invalid move."
            }
            Self::GameAlreadyOver => "The game is already over.",
            Self::InternalError => "An error occurred while processing the move.",
        }
    }

    /// Longer explanation for client developers.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidJson => {
                "The frame could not be decoded. Send a JSON object with `player` and `move` fields."
            }
            Self::MessageTooLarge => {
                "The frame exceeds the configured maximum message size and was discarded."
            }
            Self::IdentityMismatch => {
                "The `player` field does not match the identity this connection was opened with."
            }
            Self::InvalidMoveFormat => {
                "Moves must look like `CHAR:DIR`, with an alphanumeric character label and one of L, R, F, B, FL, FR, BL, BR."
            }
            Self::NotYourTurn => "The other player holds the turn. Wait for their move to be broadcast.",
            Self::PieceNotFound => {
                "None of your pieces on the board carries that label. Captured pieces cannot move."
            }
            Self::MoveFailed => {
                "The move is illegal from the piece's current square: off the board, blocked, or onto a friendly piece."
            }
            Self::GameAlreadyOver => "One side has no pieces left. No further moves are accepted.",
            Self::InternalError => {
                "The server failed while applying the move. The game state was left unchanged."
            }
        }
    }

    /// Moves refused because the game ended are dropped without a reply.
    pub fn is_reported(&self) -> bool {
        !matches!(self, Self::GameAlreadyOver)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<&MoveError> for ErrorCode {
    fn from(err: &MoveError) -> Self {
        match err {
            MoveError::GameAlreadyOver => Self::GameAlreadyOver,
            MoveError::NotYourTurn(_) => Self::NotYourTurn,
            MoveError::InvalidMoveFormat(_) => Self::InvalidMoveFormat,
            MoveError::PieceNotFound { .. } => Self::PieceNotFound,
            MoveError::MoveFailed(_) => Self::MoveFailed,
            MoveError::Internal => Self::InternalError,
        }
    }
}
