use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use crate::{
    board::Board,
    coord::Coord,
    movement::{Lan, Move, ParseLanError},
    player::RandomPlayer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Board,
    Moves,
    Random,
    Restart,
    Save,
    Quit,
    Coord(Coord),
    Move(Lan),
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "board" => Ok(Input::Board),
            "moves" => Ok(Input::Moves),
            "random" => Ok(Input::Random),
            "restart" => Ok(Input::Restart),
            "save" => Ok(Input::Save),
            "quit" => Ok(Input::Quit),
            s => {
                if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ParseInputError(ParseLanError);

impl From<ParseLanError> for ParseInputError {
    fn from(value: ParseLanError) -> Self {
        ParseInputError(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

fn write_moves(
    output: &mut impl Write,
    moves: impl IntoIterator<Item = Move>,
) -> io::Result<()> {
    let mut moves: Vec<_> = moves.into_iter().map(Move::as_lan).collect();
    moves.sort_unstable();
    let mut first = true;
    for movement in moves {
        if !first {
            write!(output, " ")?;
        }
        write!(output, "{movement}")?;
        first = false;
    }
    writeln!(output)?;
    Ok(())
}
fn write_status(output: &mut impl Write, board: &Board) -> io::Result<()> {
    if let Some(end_state) = board.end_state() {
        writeln!(output, "{end_state}")?;
    } else if board.in_check() {
        writeln!(output, "{} plays, in check", board.turn())?;
    } else {
        writeln!(output, "{} plays", board.turn())?;
    }
    Ok(())
}
/// Runs the console on the standard streams.
pub fn repl(seed: Option<u64>) -> io::Result<()> {
    run(stdin().lock(), stdout().lock(), stderr().lock(), seed)
}
/// Runs the console until `quit` or the end of `input`. Diagnostics are
/// written to `error`, everything else to `output`.
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn run(
    input: impl BufRead,
    mut output: impl Write,
    mut error: impl Write,
    seed: Option<u64>,
) -> io::Result<()> {
    let mut lines = input.lines();

    let mut board = Board::starting_position();
    let mut player = RandomPlayer::new(seed);
    let mut update = true;
    let mut first_time = true;
    loop {
        if update {
            write!(output, "{board}")?;
            write_status(&mut output, &board)?;
        }
        if first_time {
            writeln!(output, "type `help` for instructions")?;
            first_time = false;
        }
        update = false;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let text = text?;
            let input = match text.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            match input {
                Input::Help => {
                    writeln!(output, "board   - show the board")?;
                    writeln!(output, "moves   - list every legal move")?;
                    writeln!(output, "e2      - list legal moves from a square")?;
                    writeln!(output, "e2e4    - play the move")?;
                    writeln!(output, "e7e8q   - move and promote")?;
                    writeln!(output, "e1g1    - perform castling")?;
                    writeln!(output, "random  - play a random legal move")?;
                    writeln!(output, "restart - reset to starting position")?;
                    writeln!(output, "save    - save the game")?;
                    writeln!(output, "quit    - quit the game")?;
                }
                Input::Board => update = true,
                Input::Moves => write_moves(&mut output, board.legal_moves())?,
                Input::Coord(position) => {
                    let Some(piece) = board.piece_at(position) else {
                        writeln!(error, "Error: No piece found on {position}")?;
                        continue;
                    };
                    if piece.color != board.turn() {
                        writeln!(error, "Error: It is {}'s turn", board.turn())?;
                        continue;
                    }
                    write_moves(&mut output, board.legal_moves_from(position))?;
                }
                Input::Move(lan) => {
                    if let Err(err) = board.play(lan) {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    update = true;
                }
                Input::Random => {
                    let Some(movement) = player.choose(&board) else {
                        writeln!(error, "Error: The game is over")?;
                        continue;
                    };
                    if let Err(err) = board.move_piece(&movement) {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    writeln!(output, "played {movement}")?;
                    update = true;
                }
                Input::Restart => {
                    board = Board::starting_position();
                    update = true;
                }
                Input::Save => {
                    writeln!(error, "Error: Saving games is not supported yet")?;
                    continue;
                }
                Input::Quit => return Ok(()),
            }
            break;
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{board::Board, repl::run};

    fn transcript(input: &str) -> (String, String) {
        let mut output = Vec::new();
        let mut error = Vec::new();
        run(input.as_bytes(), &mut output, &mut error, Some(1)).unwrap();
        (
            String::from_utf8(output).unwrap(),
            String::from_utf8(error).unwrap(),
        )
    }

    #[test]
    fn quit_right_away() {
        let (output, error) = transcript("quit\n");
        assert_eq!(
            output,
            format!(
                "{}white plays\ntype `help` for instructions\n> ",
                Board::starting_position()
            )
        );
        assert_eq!(error, "");
    }
    #[test]
    fn end_of_input_stops() {
        let (output, _) = transcript("");
        assert!(output.ends_with("> "));
    }
    #[test]
    fn play_and_list_moves() {
        let (output, error) = transcript("e2e4\ne7\ng1\ng8\n");
        assert_eq!(error, "Error: It is black's turn\n");
        assert!(output.contains("black plays\n"));
        assert!(output.contains("> e7e5 e7e6\n"));
        assert!(output.contains("> g8f6 g8h6\n"));
    }
    #[test]
    fn errors_go_to_the_error_stream() {
        let (output, error) = transcript("e2e5\nd4\nzz\nsave\nmoves\n");
        let mut lines = error.lines();
        assert_eq!(lines.next(), Some("Error: e2e5 matches no legal move"));
        assert_eq!(lines.next(), Some("Error: No piece found on d4"));
        assert!(lines.next().is_some_and(|line| line.starts_with("Error: ")));
        assert_eq!(lines.next(), Some("for available command, enter `help`"));
        assert_eq!(lines.next(), Some("Error: Saving games is not supported yet"));
        assert_eq!(lines.next(), None);
        assert!(output.ends_with(
            "> a2a3 a2a4 b1a3 b1c3 b2b3 b2b4 c2c3 c2c4 d2d3 d2d4 e2e3 e2e4 f2f3 f2f4 g1f3 g1h3 g2g3 g2g4 h2h3 h2h4\n> "
        ));
    }
    #[test]
    fn fools_mate_is_reported() {
        let (output, error) = transcript("f2f3\ne7e5\ng2g4\nd8h4\nrandom\nrestart\n");
        assert!(output.contains("black wins by checkmate\n"));
        assert_eq!(error, "Error: The game is over\n");
        assert!(output.ends_with(&format!("{}white plays\n> ", Board::starting_position())));
    }
    #[test]
    fn random_move_is_played() {
        let (output, error) = transcript("random\n");
        assert_eq!(error, "");
        assert!(output.contains("played "));
        assert!(output.contains("black plays\n"));
    }
}
