use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rustc_hash::FxHashSet;

use crate::{
    color::Color,
    coord::{Coord, Vector, home_rank, king_home},
    coord_file,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const PROMOTION_CHOICES: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTION_CHOICES.contains(&self)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsePieceKindError {
    Empty,
    UnknownSymbol(char),
    UnexpectedSymbol(char),
}
impl Display for ParsePieceKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParsePieceKindError::Empty => write!(f, "expected one character, found none instead")?,
            ParsePieceKindError::UnknownSymbol(c) => write!(
                f,
                "found `{c}`, expected one of `p`, `n`, `b`, `r`, `q`, `k`, or uppercase forms of these letters"
            )?,
            ParsePieceKindError::UnexpectedSymbol(c) => {
                write!(f, "unexpected `{c}`, only one character is expected")?;
            }
        }
        Ok(())
    }
}
impl Error for ParsePieceKindError {}

impl TryFrom<char> for PieceKind {
    type Error = ParsePieceKindError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let piece = match value {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(ParsePieceKindError::UnknownSymbol(c)),
        };
        Ok(piece)
    }
}
impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut characters = s.chars();
        let piece = characters
            .next()
            .ok_or(ParsePieceKindError::Empty)?
            .try_into()?;

        if let Some(c) = characters.next() {
            return Err(ParsePieceKindError::UnexpectedSymbol(c));
        }
        Ok(piece)
    }
}

/// A piece as the board tracks it: by kind, color, and whether it has moved.
///
/// Two pieces with equal fields are interchangeable; the board never tells
/// one white unmoved rook from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub moved: bool,
}
impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            moved: false,
        }
    }
    pub fn pawn(color: Color) -> Self {
        Piece::new(PieceKind::Pawn, color)
    }
    pub fn knight(color: Color) -> Self {
        Piece::new(PieceKind::Knight, color)
    }
    pub fn bishop(color: Color) -> Self {
        Piece::new(PieceKind::Bishop, color)
    }
    pub fn rook(color: Color) -> Self {
        Piece::new(PieceKind::Rook, color)
    }
    pub fn queen(color: Color) -> Self {
        Piece::new(PieceKind::Queen, color)
    }
    pub fn king(color: Color) -> Self {
        Piece::new(PieceKind::King, color)
    }
    #[must_use]
    pub fn into_moved(self) -> Self {
        Piece {
            moved: true,
            ..self
        }
    }
    pub fn code(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    /// Squares this piece could reach from `position` on an otherwise empty
    /// board. Occupancy, blocking and check are left to the board.
    pub fn move_set(self, position: Coord) -> FxHashSet<Coord> {
        match self.kind {
            PieceKind::Pawn => {
                let forward_jumps = if self.moved { 1 } else { 2 };
                position
                    .line_exclusive(Vector::pawn_single_move(self.color))
                    .take(forward_jumps)
                    .chain(Self::step_moves(position, &Vector::pawn_attacks(self.color)))
                    .collect()
            }
            PieceKind::King => {
                let mut moves: FxHashSet<_> =
                    Self::step_moves(position, &Vector::KING_MOVES).collect();
                if !self.moved && position == king_home(self.color) {
                    moves.extend(
                        [coord_file!("c"), coord_file!("g")]
                            .map(|file| Coord::new(file, home_rank(self.color))),
                    );
                }
                moves
            }
            _ => self.attack_set(position),
        }
    }
    /// Squares this piece threatens from `position` on an otherwise empty
    /// board. Differs from [`Piece::move_set`] for pawns, which only attack
    /// diagonally, and kings, whose castling squares are never attacked.
    pub fn attack_set(self, position: Coord) -> FxHashSet<Coord> {
        match self.kind {
            PieceKind::Pawn => {
                Self::step_moves(position, &Vector::pawn_attacks(self.color)).collect()
            }
            PieceKind::Knight => Self::step_moves(position, &Vector::KNIGHT_MOVES).collect(),
            PieceKind::Bishop => Self::line_moves(position, &Vector::BISHOP_DIRECTIONS).collect(),
            PieceKind::Rook => Self::line_moves(position, &Vector::ROOK_DIRECTIONS).collect(),
            PieceKind::Queen => Self::line_moves(position, &Vector::QUEEN_DIRECTIONS).collect(),
            PieceKind::King => Self::step_moves(position, &Vector::KING_MOVES).collect(),
        }
    }
    fn step_moves(position: Coord, moves: &[Vector]) -> impl Iterator<Item = Coord> {
        moves
            .iter()
            .filter_map(move |movement| position.move_by(*movement))
    }
    fn line_moves(position: Coord, directions: &[Vector]) -> impl Iterator<Item = Coord> {
        directions
            .iter()
            .flat_map(move |direction| position.line_exclusive(*direction))
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
