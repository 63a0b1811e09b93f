#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod color;
pub mod coord;
pub mod fuzz;
mod macros;
pub mod movement;
pub mod piece;
pub mod player;
pub mod repl;
pub mod rules_thread;
pub mod square;
