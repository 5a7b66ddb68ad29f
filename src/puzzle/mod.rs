//! Glyph puzzles

use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use itertools::Itertools;
use linked_hash_map::LinkedHashMap;
use serde::Serialize;

use crate::error::{ParsePuzzleError, PuzzleFromFileError};
use crate::parse::parse_puzzle;

pub use self::clue::{Clue, Equation, Operator, ScaledLayout};

mod clue;

/// An opaque symbol standing for one unknown value
pub type Glyph = char;
pub type Value = i32;
pub type PuzzleId = u64;

/// A generated puzzle: glyphs with hidden values and the clues that reveal one of them.
///
/// The last clue is always the question, and every other clue is written for exactly one glyph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    /// the seed the puzzle was generated from
    id: PuzzleId,
    glyphs: Vec<Glyph>,
    values: LinkedHashMap<Glyph, Value>,
    clues: Vec<Clue>,
    solution: Value,
}

impl Puzzle {
    pub(crate) fn new(
        id: PuzzleId,
        glyphs: Vec<Glyph>,
        values: LinkedHashMap<Glyph, Value>,
        clues: Vec<Clue>,
        solution: Value,
    ) -> Self {
        debug_assert_eq!(glyphs.len(), values.len());
        debug_assert_eq!(glyphs.len() + 1, clues.len());
        debug_assert!(clues.last().map_or(false, Clue::is_question));
        Self {
            id,
            glyphs,
            values,
            clues,
            solution,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PuzzleFromFileError> {
        let buf = fs::read_to_string(path)?;
        let puzzle = Self::parse(&buf)?;
        Ok(puzzle)
    }

    pub fn parse(s: &str) -> Result<Self, ParsePuzzleError> {
        parse_puzzle(s)
    }

    pub fn id(&self) -> PuzzleId {
        self.id
    }

    /// The glyphs in this puzzle, the question glyph first
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn size(&self) -> usize {
        self.glyphs.len()
    }

    pub fn values(&self) -> &LinkedHashMap<Glyph, Value> {
        &self.values
    }

    pub fn value(&self, glyph: Glyph) -> Option<Value> {
        self.values.get(&glyph).copied()
    }

    /// All clues, ending with the question
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// The clues that state equations, without the question
    pub fn equation_clues(&self) -> &[Clue] {
        &self.clues[..self.clues.len() - 1]
    }

    pub fn question_glyph(&self) -> Glyph {
        self.glyphs[0]
    }

    pub fn solution(&self) -> Value {
        self.solution
    }

    pub fn is_solution(&self, guess: Value) -> bool {
        guess == self.solution
    }

    /// Values of every glyph except the question glyph
    pub fn solution_key(&self) -> Vec<(Glyph, Value)> {
        let question = self.question_glyph();
        self.values
            .iter()
            .filter(|&(&glyph, _)| glyph != question)
            .map(|(&glyph, &value)| (glyph, value))
            .collect()
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        writeln!(f, "{}", self.glyphs.iter().join(" "))?;
        for clue in &self.clues {
            writeln!(f, "{}", clue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::generate::{generate, GenerateOptions};
    use crate::puzzle::{Clue, Puzzle};

    fn puzzle() -> Puzzle {
        generate(20250101, &GenerateOptions::default()).unwrap()
    }

    #[test]
    fn question_is_last() {
        let puzzle = puzzle();
        let question = Clue::Question {
            glyph: puzzle.question_glyph(),
        };
        assert_eq!(Some(&question), puzzle.clues().last());
        assert!(!puzzle.equation_clues().iter().any(Clue::is_question));
    }

    #[test]
    fn solution_key_withholds_question() {
        let puzzle = puzzle();
        let key = puzzle.solution_key();
        assert_eq!(puzzle.size() - 1, key.len());
        assert!(key.iter().all(|&(glyph, _)| glyph != puzzle.question_glyph()));
        for (glyph, value) in key {
            assert_eq!(Some(value), puzzle.value(glyph));
        }
        assert_eq!(Some(puzzle.solution()), puzzle.value(puzzle.question_glyph()));
    }

    #[test]
    fn display_round_trip() {
        let puzzle = puzzle();
        let text = puzzle.to_string();
        assert_eq!(puzzle.size() + 3, text.lines().count());
        assert!(text.starts_with("20250101\n"));
        assert_eq!(puzzle, Puzzle::parse(&text).unwrap());
    }
}
