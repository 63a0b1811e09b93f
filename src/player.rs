use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    board::{Board, EndState},
    movement::Move,
};

/// Picks uniformly among the legal moves. Stands in for an engine.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: SmallRng,
}
impl RandomPlayer {
    /// A player seeded with `seed`, or from the operating system when absent.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        RandomPlayer { rng }
    }
    pub fn choose(&mut self, board: &Board) -> Option<Move> {
        choose_move(board, &mut self.rng)
    }
    /// Plays up to `plies` moves on `board`, stopping early once the side to
    /// move has none. Returns the moves played.
    pub fn play(&mut self, board: &mut Board, plies: usize) -> Vec<Move> {
        let mut moves = Vec::new();
        for _ in 0..plies {
            let Some(movement) = self.choose(board) else {
                break;
            };
            if board.move_piece(&movement).is_err() {
                unreachable!("a move drawn from the legal set is legal");
            }
            moves.push(movement);
        }
        moves
    }
}
/// Draws one legal move. The moves are ordered by notation first so that a
/// seeded `rng` always yields the same game.
pub fn choose_move(board: &Board, rng: &mut impl Rng) -> Option<Move> {
    let mut moves: Vec<_> = board.legal_moves().into_iter().collect();
    if moves.is_empty() {
        return None;
    }
    moves.sort_unstable_by_key(|movement| movement.as_lan());
    Some(moves[rng.random_range(0..moves.len())])
}
/// Outcome of a game left to two random players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomGame {
    pub board: Board,
    pub moves: Vec<Move>,
    pub end_state: Option<EndState>,
}
pub fn random_game(plies: usize, seed: Option<u64>) -> RandomGame {
    let mut board = Board::starting_position();
    let moves = RandomPlayer::new(seed).play(&mut board, plies);
    let end_state = board.end_state();
    RandomGame {
        board,
        moves,
        end_state,
    }
}
