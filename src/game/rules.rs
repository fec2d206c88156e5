//! Movement and capture rules.
//!
//! Every check runs before the first write, so a rejected move leaves the
//! board untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::Board;
use super::types::{Direction, Piece, PieceKind, Position};

/// Which directions each piece kind may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    /// Every kind accepts all eight directions.
    #[default]
    Unrestricted,
    /// H1 moves orthogonally only, H2 diagonally only. P1 is never restricted.
    ByKind,
}

impl DirectionPolicy {
    pub fn allows(self, kind: PieceKind, direction: Direction) -> bool {
        match (self, kind) {
            (Self::Unrestricted, _) | (Self::ByKind, PieceKind::P1) => true,
            (Self::ByKind, PieceKind::H1) => !direction.is_diagonal(),
            (Self::ByKind, PieceKind::H2) => direction.is_diagonal(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("no piece at {0}")]
    EmptyOrigin(Position),
    #[error("{kind} may not move {direction}")]
    DirectionNotAllowed {
        kind: PieceKind,
        direction: Direction,
    },
    #[error("destination is off the board")]
    OutOfBounds,
    #[error("destination {0} is held by a friendly piece")]
    FriendlyDestination(Position),
    #[error("path through {0} is blocked by a friendly piece")]
    BlockedByFriendly(Position),
}

/// Result of an applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    /// Pieces removed from the board by this move, in path order.
    pub captured: Vec<Piece>,
}

/// Check and apply a move of the piece at `origin` along `direction`.
pub fn apply_move(
    board: &mut Board,
    origin: Position,
    direction: Direction,
    policy: DirectionPolicy,
) -> Result<MoveOutcome, RuleViolation> {
    let piece = board
        .occupant_at(origin)
        .ok_or(RuleViolation::EmptyOrigin(origin))?;

    if !policy.allows(piece.kind, direction) {
        return Err(RuleViolation::DirectionNotAllowed {
            kind: piece.kind,
            direction,
        });
    }

    match piece.kind {
        PieceKind::P1 => step(board, piece, origin, direction),
        PieceKind::H1 | PieceKind::H2 => jump(board, piece, origin, direction),
    }
}

fn destination(origin: Position, direction: Direction, steps: i8) -> Result<Position, RuleViolation> {
    origin
        .offset(direction, steps)
        .filter(|pos| Board::contains(*pos))
        .ok_or(RuleViolation::OutOfBounds)
}

/// One cell; the destination must be empty or hold an enemy.
fn step(
    board: &mut Board,
    piece: Piece,
    origin: Position,
    direction: Direction,
) -> Result<MoveOutcome, RuleViolation> {
    let to = destination(origin, direction, piece.kind.range())?;

    let captured = match board.occupant_at(to) {
        None => None,
        Some(target) if target.owner != piece.owner => Some(target),
        Some(_) => return Err(RuleViolation::FriendlyDestination(to)),
    };

    board.move_piece(origin, to);
    Ok(MoveOutcome {
        piece,
        from: origin,
        to,
        captured: captured.into_iter().collect(),
    })
}

/// Two cells. An enemy on the intermediate cell is captured in passing and
/// removed; a friendly one blocks the move. The landing cell is overwritten.
fn jump(
    board: &mut Board,
    piece: Piece,
    origin: Position,
    direction: Direction,
) -> Result<MoveOutcome, RuleViolation> {
    let to = destination(origin, direction, piece.kind.range())?;
    let via = destination(origin, direction, 1)?;

    let passed = match board.occupant_at(via) {
        None => None,
        Some(target) if target.owner != piece.owner => Some(target),
        Some(_) => return Err(RuleViolation::BlockedByFriendly(via)),
    };
    let landed_on = board.occupant_at(to);

    if passed.is_some() {
        board.clear(via);
    }
    board.move_piece(origin, to);

    Ok(MoveOutcome {
        piece,
        from: origin,
        to,
        captured: passed.into_iter().chain(landed_on).collect(),
    })
}
