#[macro_export]
macro_rules! coord_file {
    ("a") => {
        0
    };
    ("b") => {
        1
    };
    ("c") => {
        2
    };
    ("d") => {
        3
    };
    ("e") => {
        4
    };
    ("f") => {
        5
    };
    ("g") => {
        6
    };
    ("h") => {
        7
    };
}
#[macro_export]
macro_rules! coord_rank {
    ("1") => {
        0
    };
    ("2") => {
        1
    };
    ("3") => {
        2
    };
    ("4") => {
        3
    };
    ("5") => {
        4
    };
    ("6") => {
        5
    };
    ("7") => {
        6
    };
    ("8") => {
        7
    };
}
/// Compile-time checked [`Coord`](crate::coord::Coord) from algebraic notation.
#[macro_export]
macro_rules! coord {
    ("a1") => {
        $crate::coord::Coord::new(0, 0)
    };
    ("a2") => {
        $crate::coord::Coord::new(0, 1)
    };
    ("a3") => {
        $crate::coord::Coord::new(0, 2)
    };
    ("a4") => {
        $crate::coord::Coord::new(0, 3)
    };
    ("a5") => {
        $crate::coord::Coord::new(0, 4)
    };
    ("a6") => {
        $crate::coord::Coord::new(0, 5)
    };
    ("a7") => {
        $crate::coord::Coord::new(0, 6)
    };
    ("a8") => {
        $crate::coord::Coord::new(0, 7)
    };
    ("b1") => {
        $crate::coord::Coord::new(1, 0)
    };
    ("b2") => {
        $crate::coord::Coord::new(1, 1)
    };
    ("b3") => {
        $crate::coord::Coord::new(1, 2)
    };
    ("b4") => {
        $crate::coord::Coord::new(1, 3)
    };
    ("b5") => {
        $crate::coord::Coord::new(1, 4)
    };
    ("b6") => {
        $crate::coord::Coord::new(1, 5)
    };
    ("b7") => {
        $crate::coord::Coord::new(1, 6)
    };
    ("b8") => {
        $crate::coord::Coord::new(1, 7)
    };
    ("c1") => {
        $crate::coord::Coord::new(2, 0)
    };
    ("c2") => {
        $crate::coord::Coord::new(2, 1)
    };
    ("c3") => {
        $crate::coord::Coord::new(2, 2)
    };
    ("c4") => {
        $crate::coord::Coord::new(2, 3)
    };
    ("c5") => {
        $crate::coord::Coord::new(2, 4)
    };
    ("c6") => {
        $crate::coord::Coord::new(2, 5)
    };
    ("c7") => {
        $crate::coord::Coord::new(2, 6)
    };
    ("c8") => {
        $crate::coord::Coord::new(2, 7)
    };
    ("d1") => {
        $crate::coord::Coord::new(3, 0)
    };
    ("d2") => {
        $crate::coord::Coord::new(3, 1)
    };
    ("d3") => {
        $crate::coord::Coord::new(3, 2)
    };
    ("d4") => {
        $crate::coord::Coord::new(3, 3)
    };
    ("d5") => {
        $crate::coord::Coord::new(3, 4)
    };
    ("d6") => {
        $crate::coord::Coord::new(3, 5)
    };
    ("d7") => {
        $crate::coord::Coord::new(3, 6)
    };
    ("d8") => {
        $crate::coord::Coord::new(3, 7)
    };
    ("e1") => {
        $crate::coord::Coord::new(4, 0)
    };
    ("e2") => {
        $crate::coord::Coord::new(4, 1)
    };
    ("e3") => {
        $crate::coord::Coord::new(4, 2)
    };
    ("e4") => {
        $crate::coord::Coord::new(4, 3)
    };
    ("e5") => {
        $crate::coord::Coord::new(4, 4)
    };
    ("e6") => {
        $crate::coord::Coord::new(4, 5)
    };
    ("e7") => {
        $crate::coord::Coord::new(4, 6)
    };
    ("e8") => {
        $crate::coord::Coord::new(4, 7)
    };
    ("f1") => {
        $crate::coord::Coord::new(5, 0)
    };
    ("f2") => {
        $crate::coord::Coord::new(5, 1)
    };
    ("f3") => {
        $crate::coord::Coord::new(5, 2)
    };
    ("f4") => {
        $crate::coord::Coord::new(5, 3)
    };
    ("f5") => {
        $crate::coord::Coord::new(5, 4)
    };
    ("f6") => {
        $crate::coord::Coord::new(5, 5)
    };
    ("f7") => {
        $crate::coord::Coord::new(5, 6)
    };
    ("f8") => {
        $crate::coord::Coord::new(5, 7)
    };
    ("g1") => {
        $crate::coord::Coord::new(6, 0)
    };
    ("g2") => {
        $crate::coord::Coord::new(6, 1)
    };
    ("g3") => {
        $crate::coord::Coord::new(6, 2)
    };
    ("g4") => {
        $crate::coord::Coord::new(6, 3)
    };
    ("g5") => {
        $crate::coord::Coord::new(6, 4)
    };
    ("g6") => {
        $crate::coord::Coord::new(6, 5)
    };
    ("g7") => {
        $crate::coord::Coord::new(6, 6)
    };
    ("g8") => {
        $crate::coord::Coord::new(6, 7)
    };
    ("h1") => {
        $crate::coord::Coord::new(7, 0)
    };
    ("h2") => {
        $crate::coord::Coord::new(7, 1)
    };
    ("h3") => {
        $crate::coord::Coord::new(7, 2)
    };
    ("h4") => {
        $crate::coord::Coord::new(7, 3)
    };
    ("h5") => {
        $crate::coord::Coord::new(7, 4)
    };
    ("h6") => {
        $crate::coord::Coord::new(7, 5)
    };
    ("h7") => {
        $crate::coord::Coord::new(7, 6)
    };
    ("h8") => {
        $crate::coord::Coord::new(7, 7)
    };
}
