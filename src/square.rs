use std::fmt::{self, Display, Formatter};

use crate::{coord::Coord, piece::Piece};

/// A board cell. Occupied exactly when it holds a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    coord: Coord,
    piece: Option<Piece>,
}
impl Square {
    pub fn empty(coord: Coord) -> Self {
        Square { coord, piece: None }
    }
    pub fn occupied(coord: Coord, piece: Piece) -> Self {
        Square {
            coord,
            piece: Some(piece),
        }
    }
    pub fn coord(self) -> Coord {
        self.coord
    }
    pub fn piece(self) -> Option<Piece> {
        self.piece
    }
    pub fn is_occupied(self) -> bool {
        self.piece.is_some()
    }
    pub(crate) fn place(&mut self, piece: Piece) {
        self.piece = Some(piece);
    }
    pub(crate) fn take(&mut self) -> Option<Piece> {
        self.piece.take()
    }
    /// Single-letter code used by the textual board dump.
    pub fn code(self) -> char {
        self.piece.map_or('-', Piece::code)
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.piece {
            Some(piece) => write!(f, "{piece} on {}", self.coord)?,
            None => write!(f, "empty {}", self.coord)?,
        }
        Ok(())
    }
}
