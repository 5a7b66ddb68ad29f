#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use anyhow::Result;
use glyph::share::ShareCard;
use glyph::{generate, Puzzle, Solver};
use itertools::Itertools;

use crate::context::Context;
use crate::options::{Options, Source};

mod context;
mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let context = Context::new(options)?;
    context.start()?;
    Ok(())
}

impl Context {
    fn start(&self) -> Result<()> {
        match self.options().source() {
            Source::File(path) => {
                println!("Reading puzzle from \"{}\"", path.display());
                let puzzle = Puzzle::from_file(path)?;
                self.on_puzzle_sourced(&puzzle)?;
            }
            Source::Generate(generate_options) => {
                for seed in generate_options.seeds()? {
                    let puzzle = generate(seed, &generate_options.options)?;
                    self.on_puzzle_sourced(&puzzle)?;
                }
            }
        }
        Ok(())
    }

    fn on_puzzle_sourced(&self, puzzle: &Puzzle) -> Result<()> {
        if self.options().json() {
            println!("{}", serde_json::to_string_pretty(puzzle)?);
        } else {
            print!("{}", puzzle);
        }
        if self.options().reveal() {
            print_key(puzzle);
        }
        if self.options().solve() {
            self.on_solve_puzzle(puzzle)?;
        }
        if !self.options().guesses().is_empty() {
            let card = ShareCard::for_puzzle(puzzle, self.options().guesses().to_vec());
            println!("{}", card);
        }
        if let Some(path) = self.save_puzzle(puzzle)? {
            println!("Saved puzzle to {}", path.display());
        }
        Ok(())
    }

    fn on_solve_puzzle(&self, puzzle: &Puzzle) -> Result<()> {
        let solution = Solver::new(puzzle.clues()).solve()?;
        let steps = solution
            .values()
            .iter()
            .map(|(glyph, value)| format!("{} = {}", glyph, value))
            .join(", ");
        println!("Puzzle solved: {}", steps);
        if let Some(answer) = solution.answer() {
            println!("{} = {}", puzzle.question_glyph(), answer);
        }
        Ok(())
    }
}

fn print_key(puzzle: &Puzzle) {
    let key = puzzle
        .solution_key()
        .into_iter()
        .map(|(glyph, value)| format!(" {}: {}", glyph, value))
        .join("\n");
    println!("Key:\n{}", key);
}
