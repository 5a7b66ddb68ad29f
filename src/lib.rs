//! Generate and solve glyph puzzles

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod error;
pub mod generate;
pub mod parse;
pub mod puzzle;
pub mod sequence;
pub mod share;
pub mod solve;

pub use crate::generate::{generate, GenerateOptions, Tuning};
pub use crate::puzzle::{Clue, Glyph, Puzzle, PuzzleId, Value};
pub use crate::solve::{Solution, Solver};
