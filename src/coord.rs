use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::NonZero,
    ops::{Mul, Sub},
    str::FromStr,
};

use crate::{color::Color, coord_file, coord_rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCoordError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseCoordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseCoordError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseCoordError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseCoordError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseCoordError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordOutOfRange {
    pub file: u8,
    pub rank: u8,
}
impl Display for CoordOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) is outside of the board, both must be < 8",
            self.file, self.rank
        )?;
        Ok(())
    }
}
impl Error for CoordOutOfRange {}

// Bit structure: 10FFFRRR
// first two bits is always `10` for `NonZero` size optimizations
// rank 0 is the first rank, white's home
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(NonZero<u8>);

impl Coord {
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "coordinate out of range");
        let byte = 0b1000_0000 | (file << 3) | rank;
        match NonZero::new(byte) {
            Some(byte) => Coord(byte),
            None => unreachable!(),
        }
    }
    pub fn new_checked(file: u8, rank: u8) -> Option<Self> {
        if file >= 8 || rank >= 8 {
            None
        } else {
            Some(Self::new(file, rank))
        }
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseCoordError> {
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidFile(file)),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseCoordError::InvalidRank(rank)),
        };
        Ok(Coord::new(file, rank))
    }
    pub fn file(self) -> u8 {
        (self.0.get() >> 3) & 0b_111
    }
    pub fn rank(self) -> u8 {
        self.0.get() & 0b_111
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|file| (0..8).map(move |rank| Coord::new(file, rank)))
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.file().checked_add_signed(movement.x)?,
            self.rank().checked_add_signed(movement.y)?,
        )
    }
    pub fn line(self, direction: Vector, start: i8) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (start..).map_while(move |difference| self.move_by(direction * difference))
    }
    pub fn line_exclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        self.line(direction, 1)
    }
    /// Squares strictly between `self` and `end`, or `None` when the two are
    /// not on a common rank, file, or diagonal.
    pub fn between(self, end: Self) -> Option<impl Iterator<Item = Self>> {
        let difference = end - self;
        (difference != Vector::ZERO && difference.is_straight_or_diagonal()).then(|| {
            let direction = difference.as_unit();
            self.line_exclusive(direction)
                .take_while(move |position| *position != end)
        })
    }
}
pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => coord_rank!("1"),
        Color::Black => coord_rank!("8"),
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => coord_rank!("2"),
        Color::Black => coord_rank!("7"),
    }
}
pub fn pawn_promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => coord_rank!("8"),
        Color::Black => coord_rank!("1"),
    }
}
pub fn king_home(color: Color) -> Coord {
    Coord::new(coord_file!("e"), home_rank(color))
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.file() + b'a') as char;
        let rank = self.rank() + 1;
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(file, rank)
    }
}
impl TryFrom<(u8, u8)> for Coord {
    type Error = CoordOutOfRange;

    fn try_from((file, rank): (u8, u8)) -> Result<Self, Self::Error> {
        Coord::new_checked(file, rank).ok_or(CoordOutOfRange { file, rank })
    }
}
impl From<Coord> for (u8, u8) {
    fn from(value: Coord) -> Self {
        (value.file(), value.rank())
    }
}
impl Sub<Self> for Coord {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: <i8>::try_from(self.file()).unwrap() - <i8>::try_from(rhs.file()).unwrap(),
            y: <i8>::try_from(self.rank()).unwrap() - <i8>::try_from(rhs.rank()).unwrap(),
        }
    }
}
/// Displacement between two coordinates, `x` along files and `y` along ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i8,
    pub y: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { x: 0, y: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { x: -1, y: -2 },
        Vector { x: 1, y: -2 },
        Vector { x: -1, y: 2 },
        Vector { x: 1, y: 2 },
        Vector { x: -2, y: -1 },
        Vector { x: 2, y: -1 },
        Vector { x: -2, y: 1 },
        Vector { x: 2, y: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { x: -1, y: -1 },
        Vector { x: 0, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: -1, y: 1 },
        Vector { x: 0, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: 0, y: -1 },
        Vector { x: 0, y: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            x: 0,
            y: pawn_direction(color),
        }
    }
    pub fn pawn_double_move(color: Color) -> Self {
        Vector::pawn_single_move(color) * 2
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|x| Vector {
            x,
            y: pawn_direction(color),
        })
    }
    pub fn is_straight_or_diagonal(self) -> bool {
        self.x == 0 || self.y == 0 || self.x.abs() == self.y.abs()
    }
    pub fn as_unit(self) -> Self {
        Vector {
            x: self.x.signum(),
            y: self.y.signum(),
        }
    }
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        coord,
        coord::{Coord, ParseCoordError, Vector},
    };

    #[test]
    fn algebraic_round_trip() {
        let position: Coord = "e4".parse().unwrap();
        assert_eq!((position.file(), position.rank()), (4, 3));
        assert_eq!(position, coord!("e4"));
        assert_eq!(position.to_string(), "e4");
        assert_eq!(position.to_string().parse(), Ok(position));
    }
    #[test]
    fn every_coordinate_round_trips() {
        for position in Coord::all() {
            assert_eq!(position.to_string().parse(), Ok(position));
        }
        assert_eq!(Coord::all().count(), 64);
    }
    #[test]
    fn malformed_algebraic_is_rejected() {
        assert_eq!("i1".parse::<Coord>(), Err(ParseCoordError::InvalidFile('i')));
        assert_eq!("a9".parse::<Coord>(), Err(ParseCoordError::InvalidRank('9')));
        assert_eq!("a0".parse::<Coord>(), Err(ParseCoordError::InvalidRank('0')));
        assert_eq!("".parse::<Coord>(), Err(ParseCoordError::NotEnoughCharacter(0)));
        assert_eq!("e".parse::<Coord>(), Err(ParseCoordError::NotEnoughCharacter(1)));
        assert_eq!("e44".parse::<Coord>(), Err(ParseCoordError::Unexpected('4')));
        assert_eq!("E4".parse::<Coord>(), Err(ParseCoordError::InvalidFile('E')));
    }
    #[test]
    fn out_of_range_construction_fails() {
        assert_eq!(Coord::new_checked(8, 0), None);
        assert_eq!(Coord::new_checked(0, 8), None);
        assert!(Coord::try_from((3, 9)).is_err());
        assert_eq!(Coord::try_from((7, 7)), Ok(coord!("h8")));
    }
    #[test]
    #[should_panic(expected = "coordinate out of range")]
    fn new_panics_out_of_range() {
        let _ = Coord::new(8, 8);
    }
    #[test]
    fn adjacent_squares_have_nothing_between() {
        assert_eq!(coord!("e4").between(coord!("e5")).unwrap().next(), None);
    }
    #[test]
    fn between_walks_lines_only() {
        let squares: Vec<_> = coord!("a1").between(coord!("d4")).unwrap().collect();
        assert_eq!(squares, [coord!("b2"), coord!("c3")]);
        let squares: Vec<_> = coord!("h1").between(coord!("e1")).unwrap().collect();
        assert_eq!(squares, [coord!("g1"), coord!("f1")]);
        assert!(coord!("a1").between(coord!("b3")).is_none());
        assert!(coord!("a1").between(coord!("a1")).is_none());
    }
    #[test]
    fn pawn_directions() {
        assert_eq!(coord!("e2").move_by(Vector::pawn_double_move(Color::White)), Some(coord!("e4")));
        assert_eq!(coord!("e7").move_by(Vector::pawn_double_move(Color::Black)), Some(coord!("e5")));
        assert_eq!(coord!("e8").move_by(Vector::pawn_single_move(Color::White)), None);
    }
}
