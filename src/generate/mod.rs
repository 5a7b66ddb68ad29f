//! Generate glyph puzzles from a seed

use std::ops::RangeInclusive;

use linked_hash_map::LinkedHashMap;
use rand::seq::SliceRandom;

use crate::error::ConfigurationError;
use crate::puzzle::{Clue, Glyph, Puzzle, PuzzleId, Value};
use crate::sequence::SequenceSource;

pub use self::size::DEFAULT_SIZES;

mod chain;
mod size;

/// Every glyph a puzzle can use
pub const GLYPHS: [Glyph; 9] = ['■', '●', '▲', '◆', '★', '⬟', '✦', '✧', '◈'];

/// Values handed out to glyphs before any clue redefines them
pub const VALUES: RangeInclusive<Value> = 2..=21;

pub const MIN_GLYPHS: usize = 3;

/// Empirically chosen constants that shape which clues appear
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    /// combined values must stay below this
    pub value_ceiling: Value,
    /// chance of attempting `(m1 × a) + (m2 × b) = c` when it is allowed
    pub two_dependency_chance: f64,
    /// chance of a scaled clue such as `(m × a) + b = n` when it is allowed
    pub scaled_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            value_ceiling: 150,
            two_dependency_chance: 0.7,
            scaled_chance: 0.6,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerateOptions {
    /// inclusive bounds on the number of glyphs; `DEFAULT_SIZES` when absent
    pub difficulty: Option<RangeInclusive<usize>>,
    /// only self-square and sum clues
    pub easy: bool,
    pub tuning: Tuning,
}

impl GenerateOptions {
    pub fn with_difficulty(mut self, difficulty: RangeInclusive<usize>) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_easy(mut self, easy: bool) -> Self {
        self.easy = easy;
        self
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    fn sizes(&self) -> RangeInclusive<usize> {
        self.difficulty.clone().unwrap_or(DEFAULT_SIZES)
    }
}

/// Generates the puzzle for `seed`. The same seed and options always produce the same puzzle.
pub fn generate(seed: PuzzleId, options: &GenerateOptions) -> Result<Puzzle, ConfigurationError> {
    check_sizes(&options.sizes())?;
    let mut source = SequenceSource::new(seed);

    let mut glyphs = GLYPHS.to_vec();
    glyphs.shuffle(&mut source);
    let mut pool: Vec<Value> = VALUES.collect();
    pool.shuffle(&mut source);

    let size = match &options.difficulty {
        Some(range) => size::weighted_size(range, &mut source)?,
        None => size::default_size(&mut source),
    };
    debug!("puzzle {}: {} glyphs", seed, size);
    glyphs.truncate(size);
    let values = assign_values(&glyphs, &mut pool);

    let budget = complexity_budget(size, options.easy);
    let (clues, values) = chain::build(&glyphs, values, budget, &options.tuning, &mut source);
    Ok(assemble(seed, glyphs, values, clues, &mut source))
}

fn check_sizes(sizes: &RangeInclusive<usize>) -> Result<(), ConfigurationError> {
    let (min, max) = (*sizes.start(), *sizes.end());
    let values = VALUES.count();
    if min > max {
        Err(ConfigurationError::RangeInverted { min, max })
    } else if min < MIN_GLYPHS {
        Err(ConfigurationError::TooFewGlyphs {
            requested: min,
            min: MIN_GLYPHS,
        })
    } else if max > GLYPHS.len() {
        Err(ConfigurationError::TooManyGlyphs {
            requested: max,
            available: GLYPHS.len(),
        })
    } else if max > values {
        Err(ConfigurationError::TooFewValues {
            requested: max,
            available: values,
        })
    } else {
        Ok(())
    }
}

/// Pops a distinct value off the shuffled pool for each glyph
fn assign_values(glyphs: &[Glyph], pool: &mut Vec<Value>) -> LinkedHashMap<Glyph, Value> {
    glyphs
        .iter()
        .zip(std::iter::from_fn(|| pool.pop()))
        .map(|(&glyph, value)| (glyph, value))
        .collect()
}

/// The number of compound clues allowed in a puzzle
fn complexity_budget(size: usize, easy: bool) -> u32 {
    if easy {
        0
    } else if size > 5 {
        2
    } else {
        1
    }
}

/// Hides the construction order and appends the question for the first glyph in solve order
fn assemble(
    id: PuzzleId,
    glyphs: Vec<Glyph>,
    values: LinkedHashMap<Glyph, Value>,
    mut clues: Vec<Clue>,
    source: &mut SequenceSource,
) -> Puzzle {
    let question = glyphs[0];
    clues.shuffle(source);
    clues.push(Clue::Question { glyph: question });
    let solution = values[&question];
    Puzzle::new(id, glyphs, values, clues, solution)
}
