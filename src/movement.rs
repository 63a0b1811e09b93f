use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::once,
    str::FromStr,
};

use rustc_hash::FxHashSet;

use crate::{
    color::Color,
    coord::{Coord, ParseCoordError, Vector, home_rank, king_home, pawn_promotion_rank},
    coord_file,
    piece::{ParsePieceKindError, Piece, PieceKind},
    square::Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidMove {
    EmptyOrigin(Coord),
    Unreachable {
        piece: Piece,
        origin: Coord,
        destination: Coord,
    },
    OwnPieceCaptured(Coord),
    NotPawn(Piece),
    DestinationOccupied(Coord),
    NotDiagonal {
        origin: Coord,
        destination: Coord,
    },
    NoCapturedPawn(Coord),
    NotPromotionRank(Coord),
    InvalidPromotion(PieceKind),
    PromotionColorMismatch {
        pawn: Color,
        promoted: Color,
    },
}
impl Display for InvalidMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMove::EmptyOrigin(position) => write!(f, "no piece found on {position}")?,
            InvalidMove::Unreachable {
                piece,
                origin,
                destination,
            } => write!(f, "{piece} on {origin} can't reach {destination}")?,
            InvalidMove::OwnPieceCaptured(position) => {
                write!(f, "{position} is occupied by a piece of the same color")?;
            }
            InvalidMove::NotPawn(piece) => write!(f, "{piece} is not a pawn")?,
            InvalidMove::DestinationOccupied(position) => write!(f, "{position} is occupied")?,
            InvalidMove::NotDiagonal {
                origin,
                destination,
            } => write!(f, "{origin} to {destination} is not a diagonal step")?,
            InvalidMove::NoCapturedPawn(position) => {
                write!(f, "no opposing pawn found on {position}")?;
            }
            InvalidMove::NotPromotionRank(position) => {
                write!(f, "{position} is not on the promotion rank")?;
            }
            InvalidMove::InvalidPromotion(kind) => write!(f, "can't promote into a {kind}")?,
            InvalidMove::PromotionColorMismatch { pawn, promoted } => {
                write!(f, "{pawn} pawn can't promote into a {promoted} piece")?;
            }
        }
        Ok(())
    }
}
impl Error for InvalidMove {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}
impl CastleSide {
    pub const ALL: [Self; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub fn from_king_destination(color: Color, destination: Coord) -> Option<Self> {
        CastleSide::ALL
            .into_iter()
            .find(|side| side.king_destination(color) == destination)
    }
    pub fn king_destination(self, color: Color) -> Coord {
        let file = match self {
            CastleSide::Kingside => coord_file!("g"),
            CastleSide::Queenside => coord_file!("c"),
        };
        Coord::new(file, home_rank(color))
    }
    pub fn rook_origin(self, color: Color) -> Coord {
        let file = match self {
            CastleSide::Kingside => coord_file!("h"),
            CastleSide::Queenside => coord_file!("a"),
        };
        Coord::new(file, home_rank(color))
    }
    pub fn rook_destination(self, color: Color) -> Coord {
        let file = match self {
            CastleSide::Kingside => coord_file!("f"),
            CastleSide::Queenside => coord_file!("d"),
        };
        Coord::new(file, home_rank(color))
    }
}
impl Display for CastleSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Kingside => write!(f, "kingside")?,
            CastleSide::Queenside => write!(f, "queenside")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalMove {
    piece: Piece,
    origin: Coord,
    destination: Coord,
    captured: Option<Piece>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleMove {
    color: Color,
    side: CastleSide,
}
impl CastleMove {
    pub fn color(self) -> Color {
        self.color
    }
    pub fn side(self) -> CastleSide {
        self.side
    }
    pub fn king_origin(self) -> Coord {
        king_home(self.color)
    }
    pub fn king_destination(self) -> Coord {
        self.side.king_destination(self.color)
    }
    pub fn rook_origin(self) -> Coord {
        self.side.rook_origin(self.color)
    }
    pub fn rook_destination(self) -> Coord {
        self.side.rook_destination(self.color)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassantMove {
    pawn: Piece,
    origin: Coord,
    destination: Coord,
    captured: Piece,
}
impl EnPassantMove {
    /// The captured pawn sits beside the origin, on the destination's file.
    pub fn captured_position(self) -> Coord {
        Coord::new(self.destination.file(), self.origin.rank())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromotionMove {
    pawn: Piece,
    origin: Coord,
    destination: Coord,
    promoted: Piece,
    captured: Option<Piece>,
}
impl PromotionMove {
    pub fn promoted(self) -> Piece {
        self.promoted
    }
}

/// A fully described move. Built from square snapshots, so it keeps
/// describing the position it was made for even after the board changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Normal(NormalMove),
    Castle(CastleMove),
    EnPassant(EnPassantMove),
    Promotion(PromotionMove),
}
fn moving_piece(origin: Square, destination: Square) -> Result<Piece, InvalidMove> {
    let piece = origin
        .piece()
        .ok_or(InvalidMove::EmptyOrigin(origin.coord()))?;
    if !piece.move_set(origin.coord()).contains(&destination.coord()) {
        return Err(InvalidMove::Unreachable {
            piece,
            origin: origin.coord(),
            destination: destination.coord(),
        });
    }
    if destination
        .piece()
        .is_some_and(|captured| captured.color == piece.color)
    {
        return Err(InvalidMove::OwnPieceCaptured(destination.coord()));
    }
    Ok(piece)
}
fn moving_pawn(origin: Square, destination: Square) -> Result<Piece, InvalidMove> {
    let pawn = moving_piece(origin, destination)?;
    if pawn.kind == PieceKind::Pawn {
        Ok(pawn)
    } else {
        Err(InvalidMove::NotPawn(pawn))
    }
}
impl Move {
    pub fn normal(origin: Square, destination: Square) -> Result<Self, InvalidMove> {
        let piece = moving_piece(origin, destination)?;
        Ok(Move::Normal(NormalMove {
            piece,
            origin: origin.coord(),
            destination: destination.coord(),
            captured: destination.piece(),
        }))
    }
    pub fn castle(color: Color, side: CastleSide) -> Self {
        Move::Castle(CastleMove { color, side })
    }
    pub fn en_passant(
        origin: Square,
        destination: Square,
        captured: Square,
    ) -> Result<Self, InvalidMove> {
        let pawn = moving_pawn(origin, destination)?;
        if destination.is_occupied() {
            return Err(InvalidMove::DestinationOccupied(destination.coord()));
        }
        if destination.coord().file() == origin.coord().file() {
            return Err(InvalidMove::NotDiagonal {
                origin: origin.coord(),
                destination: destination.coord(),
            });
        }
        let captured_position = Coord::new(destination.coord().file(), origin.coord().rank());
        let captured_pawn = captured.piece().filter(|piece| {
            captured.coord() == captured_position
                && piece.kind == PieceKind::Pawn
                && piece.color != pawn.color
        });
        let Some(captured) = captured_pawn else {
            return Err(InvalidMove::NoCapturedPawn(captured_position));
        };
        Ok(Move::EnPassant(EnPassantMove {
            pawn,
            origin: origin.coord(),
            destination: destination.coord(),
            captured,
        }))
    }
    pub fn promotion(
        origin: Square,
        destination: Square,
        promoted: Piece,
    ) -> Result<Self, InvalidMove> {
        let pawn = moving_pawn(origin, destination)?;
        if destination.coord().rank() != pawn_promotion_rank(pawn.color) {
            return Err(InvalidMove::NotPromotionRank(destination.coord()));
        }
        if !promoted.kind.is_promotion_choice() {
            return Err(InvalidMove::InvalidPromotion(promoted.kind));
        }
        if promoted.color != pawn.color {
            return Err(InvalidMove::PromotionColorMismatch {
                pawn: pawn.color,
                promoted: promoted.color,
            });
        }
        Ok(Move::Promotion(PromotionMove {
            pawn,
            origin: origin.coord(),
            destination: destination.coord(),
            promoted,
            captured: destination.piece(),
        }))
    }
    /// The piece whose origin square identifies the move, the king when
    /// castling.
    pub fn piece(self) -> Piece {
        match self {
            Move::Normal(movement) => movement.piece,
            Move::Castle(movement) => Piece::king(movement.color),
            Move::EnPassant(movement) => movement.pawn,
            Move::Promotion(movement) => movement.pawn,
        }
    }
    pub fn pieces(self) -> FxHashSet<Piece> {
        match self {
            Move::Castle(movement) => [Piece::king(movement.color), Piece::rook(movement.color)]
                .into_iter()
                .collect(),
            movement => once(movement.piece()).collect(),
        }
    }
    pub fn color(self) -> Color {
        self.piece().color
    }
    pub fn from(self) -> Coord {
        match self {
            Move::Normal(movement) => movement.origin,
            Move::Castle(movement) => movement.king_origin(),
            Move::EnPassant(movement) => movement.origin,
            Move::Promotion(movement) => movement.origin,
        }
    }
    pub fn to(self) -> Coord {
        match self {
            Move::Normal(movement) => movement.destination,
            Move::Castle(movement) => movement.king_destination(),
            Move::EnPassant(movement) => movement.destination,
            Move::Promotion(movement) => movement.destination,
        }
    }
    /// Every coordinate whose occupancy this move changes.
    pub fn changed_coords(self) -> FxHashSet<Coord> {
        match self {
            Move::Castle(movement) => [
                movement.king_origin(),
                movement.king_destination(),
                movement.rook_origin(),
                movement.rook_destination(),
            ]
            .into_iter()
            .collect(),
            Move::EnPassant(movement) => [
                movement.origin,
                movement.destination,
                movement.captured_position(),
            ]
            .into_iter()
            .collect(),
            movement => [movement.from(), movement.to()].into_iter().collect(),
        }
    }
    pub fn captured(self) -> Option<Piece> {
        match self {
            Move::Normal(movement) => movement.captured,
            Move::Castle(_) => None,
            Move::EnPassant(movement) => Some(movement.captured),
            Move::Promotion(movement) => movement.captured,
        }
    }
    pub fn captured_coord(self) -> Option<Coord> {
        match self {
            Move::EnPassant(movement) => Some(movement.captured_position()),
            movement => movement.captured().map(|_| movement.to()),
        }
    }
    pub fn is_capture(self) -> bool {
        self.captured().is_some()
    }
    pub fn is_castle(self) -> bool {
        matches!(self, Move::Castle(_))
    }
    pub fn is_en_passant(self) -> bool {
        matches!(self, Move::EnPassant(_))
    }
    pub fn is_promotion(self) -> bool {
        matches!(self, Move::Promotion(_))
    }
    pub fn promoted_kind(self) -> Option<PieceKind> {
        match self {
            Move::Promotion(movement) => Some(movement.promoted.kind),
            _ => None,
        }
    }
    /// Whether this is a pawn advancing two squares, which opens en passant
    /// for the opponent's immediate reply.
    pub fn is_pawn_double_push(self) -> bool {
        match self {
            Move::Normal(movement) => {
                movement.piece.kind == PieceKind::Pawn
                    && movement.destination - movement.origin
                        == Vector::pawn_double_move(movement.piece.color)
            }
            _ => false,
        }
    }
    pub fn as_lan(self) -> Lan {
        Lan {
            origin: self.from(),
            destination: self.to(),
            promotion: self.promoted_kind(),
        }
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_lan())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseLanError {
    InvalidChar,
    ParseCoordError(ParseCoordError),
    ParsePieceKindError(ParsePieceKindError),
    Unexpected(char),
}
impl From<ParseCoordError> for ParseLanError {
    fn from(value: ParseCoordError) -> Self {
        ParseLanError::ParseCoordError(value)
    }
}
impl From<ParsePieceKindError> for ParseLanError {
    fn from(value: ParsePieceKindError) -> Self {
        ParseLanError::ParsePieceKindError(value)
    }
}
impl Display for ParseLanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseLanError::InvalidChar => write!(f, "provided string contains invalid character")?,
            ParseLanError::ParseCoordError(err) => write!(f, "{err}")?,
            ParseLanError::ParsePieceKindError(err) => write!(f, "{err}")?,
            ParseLanError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseLanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseLanError::ParseCoordError(err) => Some(err),
            ParseLanError::ParsePieceKindError(err) => Some(err),
            _ => None,
        }
    }
}

/// Long algebraic notation: origin, destination, and an optional promotion
/// letter, e.g. `e2e4` or `e7e8q`. Castling is written as the king's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lan {
    pub origin: Coord,
    pub destination: Coord,
    pub promotion: Option<PieceKind>,
}
impl Display for Lan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}
impl FromStr for Lan {
    type Err = ParseLanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let origin = s.get(0..2).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let destination = s.get(2..4).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let mut rest = s.get(4..).ok_or(ParseLanError::InvalidChar)?.chars().fuse();
        let promotion = rest.next().map(PieceKind::try_from).transpose()?;

        if let Some(c) = rest.next() {
            return Err(ParseLanError::Unexpected(c));
        }
        Ok(Lan {
            origin,
            destination,
            promotion,
        })
    }
}
