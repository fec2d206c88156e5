use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two seats at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Wire index used by the `turn` field of the state broadcast.
    pub const fn index(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Player {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(()),
        }
    }
}

/// Piece types. The label doubles as the `character` part of a move string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Leader: one step in any direction.
    P1,
    /// Straight runner: two steps, captures in passing.
    H1,
    /// Diagonal runner: two steps, captures in passing.
    H2,
}

impl PieceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::H1 => "H1",
            Self::H2 => "H2",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "P1" => Some(Self::P1),
            "H1" => Some(Self::H1),
            "H2" => Some(Self::H2),
            _ => None,
        }
    }

    /// Number of cells the piece travels in a single move.
    pub const fn range(self) -> i8 {
        match self {
            Self::P1 => 1,
            Self::H1 | Self::H2 => 2,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A piece token: owner plus kind. Pieces only exist as board contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Wire label, e.g. `A-H1`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.owner, self.kind)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.owner, self.kind)
    }
}

/// Board coordinate, row first. Row 0 is A's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `steps` cells along `direction`, or `None` when the result would be negative.
    /// The upper bound is left to `Board::in_bounds`.
    pub fn offset(self, direction: Direction, steps: i8) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row as i64 + i64::from(dr) * i64::from(steps);
        let col = self.col as i64 + i64::from(dc) * i64::from(steps);
        if row < 0 || col < 0 {
            return None;
        }
        Some(Self::new(row as usize, col as usize))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Compass directions. Deltas are absolute board deltas shared by both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    L,
    R,
    F,
    B,
    FL,
    FR,
    BL,
    BR,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::L,
        Self::R,
        Self::F,
        Self::B,
        Self::FL,
        Self::FR,
        Self::BL,
        Self::BR,
    ];

    /// (row, col) delta for one step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::L => (0, -1),
            Self::R => (0, 1),
            Self::F => (1, 0),
            Self::B => (-1, 0),
            Self::FL => (-1, -1),
            Self::FR => (-1, 1),
            Self::BL => (1, -1),
            Self::BR => (1, 1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(self, Self::FL | Self::FR | Self::BL | Self::BR)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::R => "R",
            Self::F => "F",
            Self::B => "B",
            Self::FL => "FL",
            Self::FR => "FR",
            Self::BL => "BL",
            Self::BR => "BR",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_round_trips_through_its_symbol() {
        for direction in Direction::ALL {
            assert_eq!(direction.as_str().parse::<Direction>(), Ok(direction));
        }
        assert!("N".parse::<Direction>().is_err());
        assert!("f".parse::<Direction>().is_err());
    }

    #[test]
    fn forward_is_absolute_for_both_players() {
        assert_eq!(Direction::F.delta(), (1, 0));
        assert_eq!(Direction::B.delta(), (-1, 0));
    }

    #[test]
    fn offset_below_zero_is_none() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(Direction::B, 1), None);
        assert_eq!(origin.offset(Direction::L, 2), None);
        assert_eq!(origin.offset(Direction::BR, 2), Some(Position::new(2, 2)));
    }

    #[test]
    fn piece_label_matches_wire_format() {
        assert_eq!(Piece::new(Player::B, PieceKind::H2).label(), "B-H2");
        assert_eq!(Player::A.opponent(), Player::B);
        assert_eq!(Player::B.index(), 1);
    }
}
