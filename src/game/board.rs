//! Fixed 5x5 board holding piece tokens.
//!
//! The board is plain data. It never checks legality; that belongs to
//! [`crate::game::rules`].

use super::types::{Piece, PieceKind, Player, Position};

pub const BOARD_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// Board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Starting layout: A on row 0, B on row 4, each `P1 H1 H1 H2 H2`.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; BOARD_SIZE] = [
            PieceKind::P1,
            PieceKind::H1,
            PieceKind::H1,
            PieceKind::H2,
            PieceKind::H2,
        ];

        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.place(Position::new(0, col), Piece::new(Player::A, kind));
            board.place(
                Position::new(BOARD_SIZE - 1, col),
                Piece::new(Player::B, kind),
            );
        }
        board
    }

    pub const fn in_bounds(row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE
    }

    pub fn contains(position: Position) -> bool {
        Self::in_bounds(position.row, position.col)
    }

    pub fn occupant(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells.get(row).and_then(|cells| cells.get(col)).copied().flatten()
    }

    pub fn occupant_at(&self, position: Position) -> Option<Piece> {
        self.occupant(position.row, position.col)
    }

    /// True iff the cell holds a piece that `owner` does not own.
    pub fn is_enemy(&self, row: usize, col: usize, owner: Player) -> bool {
        self.occupant(row, col)
            .is_some_and(|piece| piece.owner != owner)
    }

    /// Relocate the piece at `from` to `to`, overwriting whatever was there.
    pub fn move_piece(&mut self, from: Position, to: Position) {
        let piece = self.take(from);
        if let Some(slot) = self.slot_mut(to) {
            *slot = piece;
        }
    }

    /// Put `piece` on `position`, replacing any occupant. Out-of-range positions are ignored.
    pub fn place(&mut self, position: Position, piece: Piece) {
        if let Some(slot) = self.slot_mut(position) {
            *slot = Some(piece);
        }
    }

    /// Remove and return the occupant of `position`.
    pub fn take(&mut self, position: Position) -> Option<Piece> {
        self.slot_mut(position).and_then(Option::take)
    }

    pub fn clear(&mut self, position: Position) {
        self.take(position);
    }

    /// First piece in row-major order owned by `owner` whose kind label is `label`.
    pub fn find_piece(&self, owner: Player, label: &str) -> Option<(Position, Piece)> {
        self.pieces()
            .find(|(_, piece)| piece.owner == owner && piece.kind.label() == label)
    }

    pub fn count_pieces(&self, owner: Player) -> usize {
        self.pieces().filter(|(_, piece)| piece.owner == owner).count()
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Position::new(row, col), piece))
            })
        })
    }

    /// Wire rendering: one label-or-null per cell.
    pub fn to_labels(&self) -> Vec<Vec<Option<String>>> {
        self.cells
            .iter()
            .map(|cells| cells.iter().map(|cell| cell.map(|p| p.label())).collect())
            .collect()
    }

    fn slot_mut(&mut self, position: Position) -> Option<&mut Option<Piece>> {
        self.cells
            .get_mut(position.row)
            .and_then(|cells| cells.get_mut(position.col))
    }
}
