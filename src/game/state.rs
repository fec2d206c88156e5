//! Turn-based state machine on top of the board and rule engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::board::Board;
use super::rules::{apply_move, DirectionPolicy, MoveOutcome, RuleViolation};
use super::types::{Direction, Piece, Player};

/// A parsed `CHAR:DIR` move request. The character label is kept as sent;
/// it is matched against piece kinds during lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub character: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move format: {0:?}")]
pub struct MoveFormatError(pub String);

impl FromStr for MoveCommand {
    type Err = MoveFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveFormatError(s.to_string());

        let mut parts = s.split(':');
        let (Some(character), Some(direction), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if character.is_empty() || !character.chars().all(char::is_alphanumeric) {
            return Err(invalid());
        }
        let direction = direction.parse::<Direction>().map_err(|()| invalid())?;

        Ok(Self {
            character: character.to_string(),
            direction,
        })
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.character, self.direction)
    }
}

/// Entry in the append-only move log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: Player,
    pub character: String,
    pub direction: Direction,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.player, self.character, self.direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("not {0}'s turn")]
    NotYourTurn(Player),
    #[error(transparent)]
    InvalidMoveFormat(#[from] MoveFormatError),
    #[error("{player} has no piece labelled {character}")]
    PieceNotFound { player: Player, character: String },
    #[error("move rejected: {0}")]
    MoveFailed(#[from] RuleViolation),
    #[error("internal error while applying move")]
    Internal,
}

/// Owner of the board, turn, history and terminal flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Player,
    game_over: bool,
    winner: Option<Player>,
    move_history: Vec<MoveRecord>,
    captured: Vec<Piece>,
    policy: DirectionPolicy,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DirectionPolicy::default())
    }
}

impl GameState {
    pub fn new(policy: DirectionPolicy) -> Self {
        Self::with_board(Board::initial(), Player::A, policy)
    }

    /// Start from an arbitrary position. Used to set up endgames.
    pub fn with_board(board: Board, turn: Player, policy: DirectionPolicy) -> Self {
        let mut state = Self {
            board,
            turn,
            game_over: false,
            winner: None,
            move_history: Vec::new(),
            captured: Vec::new(),
            policy,
        };
        state.check_game_over();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn policy(&self) -> DirectionPolicy {
        self.policy
    }

    /// Validate and apply a raw `CHAR:DIR` move for `player`.
    pub fn handle_move(&mut self, player: Player, descriptor: &str) -> Result<MoveOutcome, MoveError> {
        self.ensure_can_move(player)?;
        let command = descriptor.parse::<MoveCommand>()?;
        self.apply_command(player, &command)
    }

    /// Apply an already-parsed command. Performs the same checks as `handle_move`.
    pub fn apply_command(
        &mut self,
        player: Player,
        command: &MoveCommand,
    ) -> Result<MoveOutcome, MoveError> {
        self.ensure_can_move(player)?;

        // Row-major first match; a blocked first piece is not retried with the second.
        let (origin, _) = self
            .board
            .find_piece(player, &command.character)
            .ok_or_else(|| MoveError::PieceNotFound {
                player,
                character: command.character.clone(),
            })?;

        let outcome = apply_move(&mut self.board, origin, command.direction, self.policy)?;

        self.turn = player.opponent();
        self.move_history.push(MoveRecord {
            player,
            character: command.character.clone(),
            direction: command.direction,
        });
        self.captured.extend(outcome.captured.iter().copied());
        self.check_game_over();

        Ok(outcome)
    }

    fn ensure_can_move(&self, player: Player) -> Result<(), MoveError> {
        if self.game_over {
            return Err(MoveError::GameAlreadyOver);
        }
        if player != self.turn {
            return Err(MoveError::NotYourTurn(player));
        }
        Ok(())
    }

    fn check_game_over(&mut self) {
        let a_left = self.board.count_pieces(Player::A);
        let b_left = self.board.count_pieces(Player::B);
        if a_left == 0 || b_left == 0 {
            self.game_over = true;
            self.winner = match (a_left, b_left) {
                (0, 0) => None,
                (0, _) => Some(Player::B),
                _ => Some(Player::A),
            };
        }
    }
}
