#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    error::Error,
    io::{self, Write, stderr, stdout},
    process::ExitCode,
};

use arbiter::{board::Board, fuzz::fuzz, player::random_game, repl::repl};
use clap::{Command, arg, command, value_parser};

fn seed_arg() -> clap::Arg {
    arg!(
        -s --seed <SEED> "Seed for the random move picker"
    )
    .value_parser(value_parser!(u64))
}
fn cli() -> Command {
    command!()
        .propagate_version(true)
        .subcommand(
            Command::new("play")
                .about("Play on the console")
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("random")
                .about("Let two random players play each other")
                .arg(
                    arg!(
                        -p --plies <PLIES> "Maximum number of moves"
                    )
                    .default_value("40")
                    .value_parser(value_parser!(usize)),
                )
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("fuzz")
                .about("Compare legal moves against the chess crate over random games")
                .arg(
                    arg!(
                        -g --games <GAMES> "Number of games"
                    )
                    .default_value("100")
                    .value_parser(value_parser!(usize)),
                )
                .arg(
                    arg!(
                        -p --plies <PLIES> "Maximum number of moves per game"
                    )
                    .default_value("200")
                    .value_parser(value_parser!(usize)),
                )
                .arg(seed_arg()),
        )
}
fn random(mut output: impl Write, plies: usize, seed: Option<u64>) -> io::Result<()> {
    let game = random_game(plies, seed);
    let mut board = Board::starting_position();
    write!(output, "{board}")?;
    for movement in game.moves {
        board.move_piece(&movement).map_err(io::Error::other)?;
        writeln!(output)?;
        writeln!(output, "{} plays {movement}", movement.color())?;
        write!(output, "{board}")?;
    }
    if let Some(end_state) = game.end_state {
        writeln!(output, "{end_state}")?;
    }
    Ok(())
}
fn run_fuzz(games: usize, plies: usize, seed: Option<u64>) -> Result<(), Box<dyn Error>> {
    let positions = fuzz(games, plies, seed)?;
    writeln!(stdout(), "{positions} positions agree")?;
    Ok(())
}
fn main() -> ExitCode {
    let matches = cli().get_matches();
    let result: Result<(), Box<dyn Error>> = match matches.subcommand() {
        Some(("play", args)) => repl(args.get_one::<u64>("seed").copied()).map_err(Into::into),
        Some(("random", args)) => random(
            stdout().lock(),
            *args.get_one::<usize>("plies").unwrap(),
            args.get_one::<u64>("seed").copied(),
        )
        .map_err(Into::into),
        Some(("fuzz", args)) => run_fuzz(
            *args.get_one::<usize>("games").unwrap(),
            *args.get_one::<usize>("plies").unwrap(),
            args.get_one::<u64>("seed").copied(),
        ),
        None => repl(None).map_err(Into::into),
        _ => unreachable!("Exhausted list of subcommands"),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(stderr(), "Error: {err}");
            ExitCode::FAILURE
        }
    }
}
