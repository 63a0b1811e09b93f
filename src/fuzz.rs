use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::{once, repeat},
};

use rand::{SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board::{Board, EndState},
    color::Color,
    coord::Coord,
    movement::{CastleSide, Lan, Move},
    piece::{Piece, PieceKind},
    player::choose_move,
};

impl From<chess::Piece> for PieceKind {
    fn from(value: chess::Piece) -> Self {
        match value {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}
impl From<chess::Square> for Coord {
    fn from(value: chess::Square) -> Self {
        Coord::new(
            value.get_file().to_index().try_into().unwrap(),
            value.get_rank().to_index().try_into().unwrap(),
        )
    }
}
impl From<chess::ChessMove> for Lan {
    fn from(value: chess::ChessMove) -> Self {
        Lan {
            origin: value.get_source().into(),
            destination: value.get_dest().into(),
            promotion: value.get_promotion().map(Into::into),
        }
    }
}

/// Forsyth-Edwards notation of a board, with zeroed move clocks.
pub struct Fen<'a>(pub &'a Board);

impl Fen<'_> {
    /// The en passant square, written only when a pawn of the side to move
    /// stands ready to take.
    fn en_passant_target(&self) -> Option<Coord> {
        let board = self.0;
        let target = board.en_passant_target()?;
        let pushed = board.last_move()?.to();
        let capturer = Piece::pawn(board.turn()).into_moved();
        [-1, 1]
            .into_iter()
            .filter_map(|x| pushed.file().checked_add_signed(x))
            .filter_map(|file| Coord::new_checked(file, pushed.rank()))
            .any(|position| board.piece_at(position) == Some(capturer))
            .then_some(target)
    }
}
impl Display for Fen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for (rank, first) in (0..8).rev().zip(once(true).chain(repeat(false))) {
            if !first {
                write!(f, "/")?;
            }
            let mut squares = (0..8)
                .map(|file| board.piece_at(Coord::new(file, rank)))
                .peekable();
            while let Some(piece) = squares.next() {
                if let Some(piece) = piece {
                    write!(f, "{}", piece.code())?;
                } else {
                    let mut count = 1;
                    while squares.peek().is_some_and(Option::is_none) {
                        squares.next();
                        count += 1;
                    }
                    write!(f, "{count}")?;
                }
            }
        }
        write!(f, " {} ", board.turn().lowercase())?;
        let mut castling = false;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if board.castling_available(color, side) {
                    let kind = match side {
                        CastleSide::Kingside => PieceKind::King,
                        CastleSide::Queenside => PieceKind::Queen,
                    };
                    write!(f, "{}", Piece::new(kind, color).code())?;
                    castling = true;
                }
            }
        }
        if !castling {
            write!(f, "-")?;
        }
        match self.en_passant_target() {
            Some(position) => write!(f, " {position}")?,
            None => write!(f, " -")?,
        }
        write!(f, " 0 1")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disagreement {
    Extra(Lan),
    Missing(Lan),
    EndState {
        found: Option<EndState>,
        expected: Option<EndState>,
    },
}
/// A position where the rules engine and the reference move generator
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub disagreement: Disagreement,
    pub dump: String,
    pub fen: String,
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.disagreement {
            Disagreement::Extra(lan) => write!(f, "found {lan} but it's not a legal move")?,
            Disagreement::Missing(lan) => write!(f, "{lan} not found")?,
            Disagreement::EndState { found, expected } => {
                write!(f, "end state {found:?} disagrees with {expected:?}")?;
            }
        }
        write!(f, "\n{}{}", self.dump, self.fen)?;
        Ok(())
    }
}
impl Error for Mismatch {}

/// Compares the legal moves and end state of `board` against the `chess`
/// crate.
pub fn compare(board: &Board) -> Result<(), Mismatch> {
    let fen = Fen(board).to_string();
    let mismatch = |disagreement| Mismatch {
        disagreement,
        dump: board.to_string(),
        fen: fen.clone(),
    };
    let reference: chess::Board = fen.parse().unwrap_or_else(|err| {
        panic!("the chess crate refused {fen}: {err:?}");
    });
    let moves: FxHashSet<Lan> = board.legal_moves().into_iter().map(Move::as_lan).collect();
    let expected: FxHashSet<Lan> = chess::MoveGen::new_legal(&reference)
        .map(Into::into)
        .collect();
    if let Some(lan) = moves.difference(&expected).min() {
        return Err(mismatch(Disagreement::Extra(*lan)));
    }
    if let Some(lan) = expected.difference(&moves).min() {
        return Err(mismatch(Disagreement::Missing(*lan)));
    }
    let found = board.end_state();
    let expected = match reference.status() {
        chess::BoardStatus::Ongoing => None,
        chess::BoardStatus::Checkmate => Some(EndState::Win(!board.turn())),
        chess::BoardStatus::Stalemate => Some(EndState::Draw),
    };
    if found != expected {
        return Err(mismatch(Disagreement::EndState { found, expected }));
    }
    Ok(())
}
/// Plays `games` random games of at most `plies` moves each, comparing every
/// position on the way. Returns how many positions were compared.
pub fn fuzz(games: usize, plies: usize, seed: Option<u64>) -> Result<usize, Mismatch> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut positions = 0;
    for _ in 0..games {
        let mut board = Board::starting_position();
        for _ in 0..=plies {
            compare(&board)?;
            positions += 1;
            let Some(movement) = choose_move(&board, &mut rng) else {
                break;
            };
            if board.move_piece(&movement).is_err() {
                unreachable!("a move drawn from the legal set is legal");
            }
        }
    }
    Ok(positions)
}
