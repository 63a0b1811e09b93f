use std::{
    array,
    error::Error,
    fmt::{self, Display, Formatter},
    iter::once,
    ops::Index,
};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    color::Color,
    coord::{Coord, home_rank, king_home, pawn_home_rank, pawn_promotion_rank},
    movement::{CastleSide, Lan, Move},
    piece::{Piece, PieceKind},
    square::Square,
};

const GENERATED: &str = "generated moves satisfy their own constructor";

/// Where every piece stands: each distinct piece value maps to all the
/// coordinates holding an equal piece.
pub type Placement = FxHashMap<Piece, FxHashSet<Coord>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidBoard {
    NoKing(Color),
    ExceededKings(Color),
    Overlap(Coord),
    NonPlayerInCheck,
}
impl Display for InvalidBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBoard::NoKing(color) => write!(f, "no {color} king found")?,
            InvalidBoard::ExceededKings(color) => write!(f, "found more than 1 {color} king")?,
            InvalidBoard::Overlap(position) => write!(f, "more than one piece placed on {position}")?,
            InvalidBoard::NonPlayerInCheck => write!(f, "non-player in check")?,
        }
        Ok(())
    }
}
impl Error for InvalidBoard {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMove {
    NoPiece(Coord),
    WrongPiece {
        position: Coord,
        expected: Piece,
        found: Piece,
    },
    NotLegal(Move),
    NoSuchMove(Lan),
}
impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::NoPiece(position) => write!(f, "no piece found on {position}")?,
            IllegalMove::WrongPiece {
                position,
                expected,
                found,
            } => write!(f, "expected {expected} on {position}, found {found} instead")?,
            IllegalMove::NotLegal(movement) => write!(f, "{movement} is not a legal move")?,
            IllegalMove::NoSuchMove(lan) => write!(f, "{lan} matches no legal move")?,
        }
        Ok(())
    }
}
impl Error for IllegalMove {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    Win(Color),
    Draw,
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Win(color) => write!(f, "{color} wins by checkmate")?,
            EndState::Draw => write!(f, "draw by stalemate")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Square; 8]; 8],
    turn: Color,
    last_move: Option<Move>,
}
impl Board {
    fn empty(turn: Color) -> Self {
        Board {
            grid: array::from_fn(|file| {
                array::from_fn(|rank| {
                    Square::empty(Coord::new(file.try_into().unwrap(), rank.try_into().unwrap()))
                })
            }),
            turn,
            last_move: None,
        }
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty(Color::White);
        for color in Color::ALL {
            for (file, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                board
                    .square_mut(Coord::new(file, home_rank(color)))
                    .place(Piece::new(kind, color));
                board
                    .square_mut(Coord::new(file, pawn_home_rank(color)))
                    .place(Piece::pawn(color));
            }
        }
        board
    }
    pub fn from_placement(placement: &Placement, turn: Color) -> Result<Self, InvalidBoard> {
        let mut board = Board::empty(turn);
        for (piece, positions) in placement {
            for position in positions {
                let square = board.square_mut(*position);
                if square.is_occupied() {
                    return Err(InvalidBoard::Overlap(*position));
                }
                square.place(*piece);
            }
        }
        board.validate()?;
        Ok(board)
    }
    pub fn validate(&self) -> Result<(), InvalidBoard> {
        for color in Color::ALL {
            let mut kings = self.squares().filter(|square| {
                square
                    .piece()
                    .is_some_and(|piece| piece.kind == PieceKind::King && piece.color == color)
            });
            if kings.next().is_none() {
                return Err(InvalidBoard::NoKing(color));
            }
            if kings.next().is_some() {
                return Err(InvalidBoard::ExceededKings(color));
            }
        }
        if self.king_in_check(!self.turn) {
            return Err(InvalidBoard::NonPlayerInCheck);
        }
        Ok(())
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }
    pub fn square(&self, position: Coord) -> Square {
        self[position]
    }
    pub fn piece_at(&self, position: Coord) -> Option<Piece> {
        self[position].piece()
    }
    fn square_mut(&mut self, position: Coord) -> &mut Square {
        &mut self.grid[usize::from(position.file())][usize::from(position.rank())]
    }
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        self.grid.iter().flatten().copied()
    }
    pub fn king(&self, color: Color) -> Coord {
        self.squares()
            .find(|square| {
                square
                    .piece()
                    .is_some_and(|piece| piece.kind == PieceKind::King && piece.color == color)
            })
            .map(Square::coord)
            .expect("every board holds one king per color")
    }
    pub fn placement(&self) -> Placement {
        let mut placement = Placement::default();
        for square in self.squares() {
            if let Some(piece) = square.piece() {
                placement.entry(piece).or_default().insert(square.coord());
            }
        }
        placement
    }
    /// Whether the king and the rook on `side` are both still unmoved on
    /// their home squares. Says nothing about blockers or attacked squares.
    pub fn castling_available(&self, color: Color, side: CastleSide) -> bool {
        self.piece_at(king_home(color)) == Some(Piece::king(color))
            && self.piece_at(side.rook_origin(color)) == Some(Piece::rook(color))
    }
    /// The square a pawn passed over on the previous move, if that move was a
    /// two-square push.
    pub fn en_passant_target(&self) -> Option<Coord> {
        let push = self.last_move.filter(|movement| movement.is_pawn_double_push())?;
        push.from().between(push.to())?.next()
    }
    fn path_is_clear(&self, origin: Coord, destination: Coord) -> bool {
        origin
            .between(destination)
            .is_none_or(|mut inside| inside.all(|position| !self[position].is_occupied()))
    }
    fn is_attacked(&self, target: Coord, attacker: Color) -> bool {
        self.squares().any(|square| {
            square.piece().is_some_and(|piece| {
                piece.color == attacker
                    && piece.attack_set(square.coord()).contains(&target)
                    && self.path_is_clear(square.coord(), target)
            })
        })
    }
    fn king_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king(color), !color)
    }
    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.king_in_check(self.turn)
    }
    /// Whether the side to move would be in check with its king standing on
    /// `position` instead. The board is left as it was.
    pub(crate) fn in_check_at(&mut self, position: Coord) -> bool {
        let king = self.king(self.turn);
        let snapshot = self.snapshot([king, position]);
        if let Some(piece) = self.square_mut(king).take() {
            self.square_mut(position).place(piece);
        }
        let attacked = self.is_attacked(position, !self.turn);
        self.restore(snapshot);
        attacked
    }
    fn snapshot(&self, positions: impl IntoIterator<Item = Coord>) -> Vec<Square> {
        positions
            .into_iter()
            .map(|position| self[position])
            .collect()
    }
    fn restore(&mut self, snapshot: Vec<Square>) {
        for square in snapshot {
            *self.square_mut(square.coord()) = square;
        }
    }
    fn relocate(&mut self, origin: Coord, destination: Coord) {
        if let Some(piece) = self.square_mut(origin).take() {
            self.square_mut(destination).place(piece.into_moved());
        }
    }
    /// Rearranges the grid as `movement` describes. Turn and last move are
    /// left untouched.
    fn apply(&mut self, movement: Move) {
        match movement {
            Move::Normal(_) => self.relocate(movement.from(), movement.to()),
            Move::Castle(castle) => {
                self.relocate(castle.king_origin(), castle.king_destination());
                self.relocate(castle.rook_origin(), castle.rook_destination());
            }
            Move::EnPassant(en_passant) => {
                self.square_mut(en_passant.captured_position()).take();
                self.relocate(movement.from(), movement.to());
            }
            Move::Promotion(promotion) => {
                self.square_mut(movement.from()).take();
                self.square_mut(movement.to())
                    .place(promotion.promoted().into_moved());
            }
        }
    }
    fn leaves_king_safe(&mut self, movement: Move) -> bool {
        let snapshot = self.snapshot(movement.changed_coords());
        self.apply(movement);
        let safe = !self.king_in_check(movement.color());
        self.restore(snapshot);
        safe
    }
    fn en_passant_victim(&self, destination: Coord) -> Option<Square> {
        let push = self.last_move?;
        (self.en_passant_target() == Some(destination)).then(|| self[push.to()])
    }
    fn pawn_moves(&self, origin: Square, target: Square, moves: &mut Vec<Move>) {
        let (from, to) = (origin.coord(), target.coord());
        if from.file() == to.file() {
            if target.is_occupied() || !self.path_is_clear(from, to) {
                return;
            }
        } else if !target.is_occupied() {
            if let Some(captured) = self.en_passant_victim(to) {
                moves.push(Move::en_passant(origin, target, captured).expect(GENERATED));
            }
            return;
        }
        if to.rank() == pawn_promotion_rank(self.turn) {
            moves.extend(PieceKind::PROMOTION_CHOICES.map(|kind| {
                Move::promotion(origin, target, Piece::new(kind, self.turn)).expect(GENERATED)
            }));
        } else {
            moves.push(Move::normal(origin, target).expect(GENERATED));
        }
    }
    fn castle_move(&mut self, origin: Square, target: Square) -> Option<Move> {
        let color = self.turn;
        let side = CastleSide::from_king_destination(color, target.coord())?;
        if origin.coord() != king_home(color)
            || !self.castling_available(color, side)
            || !self.path_is_clear(origin.coord(), side.rook_origin(color))
            || self.in_check()
        {
            return None;
        }
        let crossed: Vec<_> = origin
            .coord()
            .between(target.coord())?
            .chain(once(target.coord()))
            .collect();
        if crossed
            .into_iter()
            .any(|position| self.in_check_at(position))
        {
            return None;
        }
        Some(Move::castle(color, side))
    }
    /// Moves that respect geometry, blocking and castling conditions but may
    /// still leave the mover's own king in check.
    fn candidate_moves(&mut self) -> Vec<Move> {
        let turn = self.turn;
        let origins: Vec<_> = self
            .squares()
            .filter_map(|square| {
                square
                    .piece()
                    .filter(|piece| piece.color == turn)
                    .map(|piece| (square, piece))
            })
            .collect();
        let mut moves = Vec::new();
        for (origin, piece) in origins {
            for destination in piece.move_set(origin.coord()) {
                let target = self[destination];
                if target.piece().is_some_and(|other| other.color == turn) {
                    continue;
                }
                match piece.kind {
                    PieceKind::Pawn => self.pawn_moves(origin, target, &mut moves),
                    PieceKind::King if (destination - origin.coord()).x.abs() == 2 => {
                        moves.extend(self.castle_move(origin, target));
                    }
                    _ => {
                        if self.path_is_clear(origin.coord(), destination) {
                            moves.push(Move::normal(origin, target).expect(GENERATED));
                        }
                    }
                }
            }
        }
        moves
    }
    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> FxHashSet<Move> {
        let mut scratch = self.clone();
        scratch
            .candidate_moves()
            .into_iter()
            .filter(|movement| scratch.leaves_king_safe(*movement))
            .collect()
    }
    pub fn legal_moves_from(&self, position: Coord) -> FxHashSet<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|movement| movement.from() == position)
            .collect()
    }
    pub fn find_move(&self, lan: Lan) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|movement| movement.as_lan() == lan)
    }
    pub fn move_piece(&mut self, movement: &Move) -> Result<(), IllegalMove> {
        let position = movement.from();
        let expected = movement.piece();
        let found = self
            .piece_at(position)
            .ok_or(IllegalMove::NoPiece(position))?;
        if found != expected {
            return Err(IllegalMove::WrongPiece {
                position,
                expected,
                found,
            });
        }
        if !self.legal_moves().contains(movement) {
            return Err(IllegalMove::NotLegal(*movement));
        }
        self.apply(*movement);
        self.turn = !self.turn;
        self.last_move = Some(*movement);
        debug_assert_eq!(self.validate(), Ok(()));
        Ok(())
    }
    /// Plays the legal move written as `lan`.
    pub fn play(&mut self, lan: Lan) -> Result<Move, IllegalMove> {
        let movement = self.find_move(lan).ok_or(IllegalMove::NoSuchMove(lan))?;
        self.move_piece(&movement)?;
        Ok(movement)
    }
    /// Whether the side to move has no legal move left. True on stalemate
    /// as well; see [`Board::end_state`] to tell the two apart.
    pub fn check_mate(&self) -> bool {
        self.legal_moves().is_empty()
    }
    pub fn stalemate(&self) -> bool {
        self.check_mate() && !self.in_check()
    }
    pub fn end_state(&self) -> Option<EndState> {
        if !self.check_mate() {
            None
        } else if self.in_check() {
            Some(EndState::Win(!self.turn))
        } else {
            Some(EndState::Draw)
        }
    }
}
impl Index<Coord> for Board {
    type Output = Square;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[usize::from(index.file())][usize::from(index.rank())]
    }
}
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                if file > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self[Coord::new(file, rank)].code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use rustc_hash::FxHashSet;

    use crate::{
        board::{Board, EndState, IllegalMove, InvalidBoard, Placement},
        color::Color,
        coord,
        coord::Coord,
        movement::{CastleSide, Lan, Move},
        piece::{Piece, PieceKind},
        square::Square,
    };

    fn placement(pieces: &[(Piece, Coord)]) -> Placement {
        let mut placement = Placement::default();
        for (piece, position) in pieces {
            placement.entry(*piece).or_default().insert(*position);
        }
        placement
    }
    fn board(pieces: &[(Piece, Coord)], turn: Color) -> Board {
        Board::from_placement(&placement(pieces), turn).unwrap()
    }
    fn play(board: &mut Board, moves: &[&str]) {
        for movement in moves {
            let lan: Lan = movement.parse().unwrap();
            board.play(lan).unwrap();
        }
    }
    fn lans(moves: &FxHashSet<Move>) -> FxHashSet<String> {
        moves.iter().map(Move::to_string).collect()
    }
    fn castle_board(king: Piece, queenside_rook: Piece, kingside_rook: Piece) -> Board {
        board(
            &[
                (king, coord!("e1")),
                (queenside_rook, coord!("a1")),
                (kingside_rook, coord!("h1")),
                (Piece::king(Color::Black), coord!("e8")),
            ],
            Color::White,
        )
    }

    #[test]
    fn starting_position_dump() {
        assert_eq!(
            Board::starting_position().to_string(),
            "r n b q k b n r\n\
            p p p p p p p p\n\
            - - - - - - - -\n\
            - - - - - - - -\n\
            - - - - - - - -\n\
            - - - - - - - -\n\
            P P P P P P P P\n\
            R N B Q K B N R\n"
        );
    }
    #[test]
    fn symmetric_opening_move_count() {
        let board = Board::starting_position();
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 20);
        for movement in moves {
            let mut board = board.clone();
            board.move_piece(&movement).unwrap();
            assert_eq!(board.turn(), Color::Black);
            assert_eq!(board.legal_moves().len(), 20);
        }
    }
    #[test]
    fn placement_round_trip() {
        let board = Board::starting_position();
        let placement = board.placement();
        assert_eq!(placement[&Piece::pawn(Color::White)].len(), 8);
        assert_eq!(
            placement[&Piece::king(Color::Black)],
            [coord!("e8")].into_iter().collect::<FxHashSet<_>>()
        );
        assert_eq!(Board::from_placement(&placement, Color::White), Ok(board));
    }
    #[test]
    fn invalid_placements() {
        let white_king = (Piece::king(Color::White), coord!("e1"));
        let black_king = (Piece::king(Color::Black), coord!("e8"));
        assert_eq!(
            Board::from_placement(&placement(&[white_king]), Color::White),
            Err(InvalidBoard::NoKing(Color::Black))
        );
        assert_eq!(
            Board::from_placement(
                &placement(&[
                    white_king,
                    black_king,
                    (Piece::king(Color::White), coord!("a1")),
                ]),
                Color::White,
            ),
            Err(InvalidBoard::ExceededKings(Color::White))
        );
        assert_eq!(
            Board::from_placement(
                &placement(&[
                    white_king,
                    black_king,
                    (Piece::queen(Color::White), coord!("e1")),
                ]),
                Color::White,
            ),
            Err(InvalidBoard::Overlap(coord!("e1")))
        );
        assert_eq!(
            Board::from_placement(
                &placement(&[
                    white_king,
                    black_king,
                    (Piece::rook(Color::White), coord!("e4")),
                ]),
                Color::White,
            ),
            Err(InvalidBoard::NonPlayerInCheck)
        );
    }
    #[test]
    fn check_must_be_resolved() {
        let board = board(
            &[
                (Piece::king(Color::White), coord!("h1")),
                (Piece::bishop(Color::White), coord!("b2")),
                (Piece::king(Color::Black), coord!("h8")),
                (Piece::queen(Color::Black), coord!("c7")),
                (Piece::bishop(Color::Black), coord!("g8")),
                (Piece::pawn(Color::Black), coord!("h7")),
            ],
            Color::Black,
        );
        assert!(board.in_check());
        assert_eq!(
            lans(&board.legal_moves()),
            ["c7g7", "c7e5", "c7c3"]
                .into_iter()
                .map(str::to_owned)
                .collect::<FxHashSet<_>>()
        );
    }
    #[test]
    fn pinned_piece_stays() {
        let board = board(
            &[
                (Piece::king(Color::White), coord!("e1")),
                (Piece::knight(Color::White), coord!("e2")),
                (Piece::king(Color::Black), coord!("e8")),
                (Piece::rook(Color::Black), coord!("e7")),
            ],
            Color::White,
        );
        assert!(board.legal_moves_from(coord!("e2")).is_empty());
        assert_eq!(board.legal_moves_from(coord!("e1")).len(), 4);
    }
    #[test]
    fn castling_needs_unmoved_rook() {
        let king = Piece::king(Color::White);
        let rook = Piece::rook(Color::White);

        let board = castle_board(king, rook, rook);
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 26);
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Kingside)));
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Queenside)));

        let board = castle_board(king, rook, rook.into_moved());
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 25);
        assert!(!moves.contains(&Move::castle(Color::White, CastleSide::Kingside)));
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Queenside)));

        let board = castle_board(king, rook.into_moved(), rook.into_moved());
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 24);
        assert!(!moves.iter().any(|movement| movement.is_castle()));

        let board = castle_board(king.into_moved(), rook, rook);
        assert_eq!(board.legal_moves().len(), 24);
        assert!(!board.castling_available(Color::White, CastleSide::Kingside));
    }
    #[test]
    fn castling_relocates_rook() {
        let rook = Piece::rook(Color::White);
        let mut board = castle_board(Piece::king(Color::White), rook, rook);
        board
            .move_piece(&Move::castle(Color::White, CastleSide::Queenside))
            .unwrap();
        assert_eq!(
            board.piece_at(coord!("c1")),
            Some(Piece::king(Color::White).into_moved())
        );
        assert_eq!(board.piece_at(coord!("d1")), Some(rook.into_moved()));
        assert_eq!(board.piece_at(coord!("a1")), None);
        assert_eq!(board.piece_at(coord!("e1")), None);
        assert_eq!(board.piece_at(coord!("h1")), Some(rook));
        assert_eq!(board.turn(), Color::Black);
    }
    #[test]
    fn castling_through_attack_blocks_one_side() {
        let rook = Piece::rook(Color::White);
        let board = board(
            &[
                (Piece::king(Color::White), coord!("e1")),
                (rook, coord!("a1")),
                (rook, coord!("h1")),
                (Piece::king(Color::Black), coord!("e8")),
                (Piece::rook(Color::Black), coord!("f8")),
            ],
            Color::White,
        );
        let moves = board.legal_moves();
        assert!(!moves.contains(&Move::castle(Color::White, CastleSide::Kingside)));
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Queenside)));
    }
    #[test]
    fn castling_past_attacked_rook_path() {
        let rook = Piece::rook(Color::White);
        let board = board(
            &[
                (Piece::king(Color::White), coord!("e1")),
                (rook, coord!("a1")),
                (rook, coord!("h1")),
                (Piece::king(Color::Black), coord!("e8")),
                (Piece::rook(Color::Black), coord!("b8")),
                (Piece::rook(Color::Black), coord!("g8")),
            ],
            Color::White,
        );
        let moves = board.legal_moves();
        assert!(!moves.contains(&Move::castle(Color::White, CastleSide::Kingside)));
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Queenside)));
    }
    #[test]
    fn no_castling_out_of_check() {
        let rook = Piece::rook(Color::White);
        let board = board(
            &[
                (Piece::king(Color::White), coord!("e1")),
                (rook, coord!("a1")),
                (rook, coord!("h1")),
                (Piece::king(Color::Black), coord!("e8")),
                (Piece::rook(Color::Black), coord!("e4")),
            ],
            Color::White,
        );
        assert!(board.in_check());
        assert!(!board.legal_moves().iter().any(|movement| movement.is_castle()));
    }
    #[test]
    fn blocked_castling() {
        let mut board = Board::starting_position();
        play(&mut board, &["e2e4", "e7e5", "g1f3", "b8c6"]);
        assert!(board.find_move("e1g1".parse().unwrap()).is_none());
        play(&mut board, &["f1c4", "g8f6"]);
        let castle = board.find_move("e1g1".parse().unwrap()).unwrap();
        assert!(castle.is_castle());
        board.move_piece(&castle).unwrap();
        assert_eq!(board.piece_at(coord!("f1")).map(|piece| piece.kind), Some(PieceKind::Rook));
    }
    #[test]
    fn en_passant_only_on_immediate_reply() {
        let setup = [
            (Piece::king(Color::White), coord!("e1")),
            (Piece::pawn(Color::White), coord!("e2")),
            (Piece::king(Color::Black), coord!("e8")),
            (Piece::pawn(Color::Black).into_moved(), coord!("d4")),
        ];
        let mut board = board(&setup, Color::White);
        play(&mut board, &["e2e4"]);
        assert_eq!(board.en_passant_target(), Some(coord!("e3")));
        let capture = board.find_move("d4e3".parse().unwrap()).unwrap();
        assert!(capture.is_en_passant());
        assert_eq!(capture.captured_coord(), Some(coord!("e4")));

        let mut taken = board.clone();
        taken.move_piece(&capture).unwrap();
        assert_eq!(taken.piece_at(coord!("e4")), None);
        assert_eq!(taken.piece_at(coord!("d4")), None);
        assert_eq!(
            taken.piece_at(coord!("e3")),
            Some(Piece::pawn(Color::Black).into_moved())
        );

        play(&mut board, &["e8d8", "e1f1"]);
        assert_eq!(board.en_passant_target(), None);
        assert!(board.find_move("d4e3".parse().unwrap()).is_none());
    }
    #[test]
    fn en_passant_cannot_open_the_rank() {
        let setup = [
            (Piece::king(Color::White).into_moved(), coord!("a5")),
            (Piece::pawn(Color::White).into_moved(), coord!("b5")),
            (Piece::pawn(Color::Black), coord!("c7")),
            (Piece::rook(Color::Black).into_moved(), coord!("h5")),
            (Piece::king(Color::Black).into_moved(), coord!("h8")),
        ];
        let mut board = board(&setup, Color::Black);
        play(&mut board, &["c7c5"]);
        assert_eq!(board.en_passant_target(), Some(coord!("c6")));
        assert!(board.find_move("b5c6".parse().unwrap()).is_none());
        assert_eq!(
            lans(&board.legal_moves_from(coord!("b5"))),
            ["b5b6"].into_iter().map(String::from).collect::<FxHashSet<_>>()
        );
        assert!(!board.in_check());
        assert_eq!(board.piece_at(coord!("c5")), Some(Piece::pawn(Color::Black).into_moved()));
    }
    #[test]
    fn en_passant_from_opening() {
        let mut board = Board::starting_position();
        play(&mut board, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);
        assert_eq!(board.piece_at(coord!("d5")), None);
        assert_eq!(
            board.piece_at(coord!("d6")),
            Some(Piece::pawn(Color::White).into_moved())
        );
        assert!(board.last_move().is_some_and(Move::is_en_passant));
    }
    #[test]
    fn promotion_offers_four_pieces() {
        let mut board = board(
            &[
                (Piece::king(Color::White), coord!("e1")),
                (Piece::pawn(Color::White).into_moved(), coord!("b7")),
                (Piece::king(Color::Black), coord!("e8")),
                (Piece::rook(Color::Black), coord!("a8")),
            ],
            Color::White,
        );
        let moves = board.legal_moves_from(coord!("b7"));
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|movement| movement.is_promotion()));
        let kinds: FxHashSet<_> = moves.iter().filter_map(|movement| movement.promoted_kind()).collect();
        assert_eq!(
            kinds,
            PieceKind::PROMOTION_CHOICES.into_iter().collect::<FxHashSet<_>>()
        );

        play(&mut board, &["b7a8n"]);
        assert_eq!(
            board.piece_at(coord!("a8")),
            Some(Piece::knight(Color::White).into_moved())
        );
        assert_eq!(board.piece_at(coord!("b7")), None);
    }
    #[test]
    fn back_rank_mate() {
        let mut board = board(
            &[
                (Piece::king(Color::White), coord!("h1")),
                (Piece::rook(Color::Black), coord!("a2")),
                (Piece::rook(Color::Black), coord!("b3")),
                (Piece::king(Color::Black), coord!("e8")),
            ],
            Color::Black,
        );
        assert!(!board.check_mate());
        play(&mut board, &["b3b1"]);
        assert!(board.in_check());
        assert!(board.legal_moves().is_empty());
        assert!(board.check_mate());
        assert!(!board.stalemate());
        assert_eq!(board.end_state(), Some(EndState::Win(Color::Black)));
    }
    #[test]
    fn stalemate_is_told_apart() {
        let board = board(
            &[
                (Piece::king(Color::White), coord!("b6")),
                (Piece::queen(Color::White), coord!("c7")),
                (Piece::king(Color::Black), coord!("a8")),
            ],
            Color::Black,
        );
        assert!(!board.in_check());
        assert!(board.check_mate());
        assert!(board.stalemate());
        assert_eq!(board.end_state(), Some(EndState::Draw));
    }
    #[test]
    fn rejected_moves() {
        let mut board = Board::starting_position();
        let push = Move::normal(board.square(coord!("e2")), board.square(coord!("e4"))).unwrap();
        let black_push =
            Move::normal(board.square(coord!("e7")), board.square(coord!("e5"))).unwrap();
        assert_eq!(
            board.move_piece(&black_push),
            Err(IllegalMove::NotLegal(black_push))
        );
        board.move_piece(&push).unwrap();
        assert_eq!(
            board.move_piece(&push),
            Err(IllegalMove::NoPiece(coord!("e2")))
        );
        let stale = Move::normal(
            Board::starting_position().square(coord!("g1")),
            board.square(coord!("e2")),
        )
        .unwrap();
        assert_eq!(
            board.move_piece(&stale),
            Err(IllegalMove::NotLegal(stale))
        );
        let lan: Lan = "e4e5".parse().unwrap();
        assert_eq!(board.play(lan), Err(IllegalMove::NoSuchMove(lan)));
    }
    #[test]
    fn wrong_piece_on_origin() {
        let mut board = Board::starting_position();
        let queen_move = Move::normal(
            Square::occupied(coord!("e2"), Piece::queen(Color::White)),
            board.square(coord!("e3")),
        )
        .unwrap();
        assert_eq!(
            board.move_piece(&queen_move),
            Err(IllegalMove::WrongPiece {
                position: coord!("e2"),
                expected: Piece::queen(Color::White),
                found: Piece::pawn(Color::White),
            })
        );
    }
    #[test]
    fn moved_pieces_are_stamped() {
        let mut board = Board::starting_position();
        play(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(
            board.piece_at(coord!("g1")),
            Some(Piece::knight(Color::White).into_moved())
        );
        assert_ne!(board, Board::starting_position());
        assert_eq!(board.legal_moves().len(), 20);
    }
}
