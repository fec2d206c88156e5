//! Game engine: board model, movement rules and the turn state machine.
//!
//! - [`board`]: the 5x5 grid and its query helpers
//! - [`rules`]: per-piece legality and capture resolution
//! - [`state`]: turn enforcement, move log and termination
//! - [`types`]: players, piece kinds, directions, positions

pub mod board;
pub mod rules;
pub mod state;
pub mod types;

pub use board::{Board, BOARD_SIZE};
pub use rules::{apply_move, DirectionPolicy, MoveOutcome, RuleViolation};
pub use state::{GameState, MoveCommand, MoveError, MoveFormatError, MoveRecord};
pub use types::{Direction, Piece, PieceKind, Player, Position};

use serde::{Deserialize, Serialize};

/// Full game state as broadcast to every participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<Option<String>>>,
    /// 0 for A, 1 for B.
    pub turn: u8,
    pub is_over: bool,
    pub move_history: Vec<String>,
    pub removed_characters: Vec<String>,
    pub winner: Option<Player>,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            board: state.board().to_labels(),
            turn: state.turn().index(),
            is_over: state.is_over(),
            move_history: state.move_history().iter().map(ToString::to_string).collect(),
            removed_characters: state.captured().iter().map(Piece::label).collect(),
            winner: state.winner(),
        }
    }
}
