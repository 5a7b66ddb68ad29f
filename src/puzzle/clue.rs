use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::puzzle::{Glyph, Value};

/// The arithmetic operators that can appear in a clue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    /// Retrieve the character representation of the symbol
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
        }
    }

    /// Retrieve an `Operator` from its corresponding symbol
    pub fn from_symbol(c: char) -> Option<Operator> {
        let o = match c {
            '+' => Operator::Add,
            '-' => Operator::Subtract,
            '×' | '*' => Operator::Multiply,
            _ => return None,
        };
        Some(o)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// How a scaled clue arranges `(m × glyph) + other = total`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaledLayout {
    /// `(m × a) + b = n`
    ScaledFirst,
    /// `b + (m × a) = n`
    ScaledLast,
    /// `(m × a) = n - b`
    Isolated,
    /// `n - b = (m × a)`
    Reversed,
}

/// One line of a puzzle.
///
/// Every clue except [`Clue::Question`] is written for a single glyph (see [`Clue::glyph`]),
/// and every such clue other than [`Clue::Square`] depends on glyphs solved before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clue {
    /// `a × a = product`
    Square { glyph: Glyph, product: Value },
    /// `a + b = total`
    Sum {
        glyph: Glyph,
        other: Glyph,
        total: Value,
    },
    /// `first + second + a = total`
    TripleSum {
        first: Glyph,
        second: Glyph,
        glyph: Glyph,
        total: Value,
    },
    /// `(m1 × b) + (m2 × c) = a`
    Combination {
        terms: [(Value, Glyph); 2],
        glyph: Glyph,
    },
    /// `(m × a) + b = total`, arranged according to `layout`
    Scaled {
        glyph: Glyph,
        multiplier: Value,
        other: Glyph,
        total: Value,
        layout: ScaledLayout,
    },
    /// `a = ?`
    Question { glyph: Glyph },
}

/// A clue reduced to arithmetic over glyph values
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Equation {
    /// `glyph × glyph = product`
    Square { glyph: Glyph, product: Value },
    /// the sum of `coefficient × glyph` over all terms equals `constant`
    Linear {
        terms: Vec<(Value, Glyph)>,
        constant: Value,
    },
}

impl Clue {
    /// The glyph this clue was written to determine
    pub fn glyph(&self) -> Glyph {
        match *self {
            Clue::Square { glyph, .. }
            | Clue::Sum { glyph, .. }
            | Clue::TripleSum { glyph, .. }
            | Clue::Combination { glyph, .. }
            | Clue::Scaled { glyph, .. }
            | Clue::Question { glyph } => glyph,
        }
    }

    /// Glyphs that must already be known to solve this clue for [`Clue::glyph`]
    pub fn dependencies(&self) -> Vec<Glyph> {
        match *self {
            Clue::Square { .. } | Clue::Question { .. } => Vec::new(),
            Clue::Sum { other, .. } | Clue::Scaled { other, .. } => vec![other],
            Clue::TripleSum { first, second, .. } => vec![first, second],
            Clue::Combination {
                terms: [(_, first), (_, second)],
                ..
            } => vec![first, second],
        }
    }

    /// Every glyph mentioned in the clue
    pub fn glyphs(&self) -> Vec<Glyph> {
        let mut glyphs = self.dependencies();
        glyphs.push(self.glyph());
        glyphs
    }

    /// True for clues that multiply glyphs by a constant other than the self-square
    pub fn is_compound(&self) -> bool {
        matches!(self, Clue::Combination { .. } | Clue::Scaled { .. })
    }

    pub fn is_question(&self) -> bool {
        matches!(self, Clue::Question { .. })
    }

    /// The arithmetic this clue states, or `None` for the question
    pub fn equation(&self) -> Option<Equation> {
        let equation = match *self {
            Clue::Square { glyph, product } => Equation::Square { glyph, product },
            Clue::Sum {
                glyph,
                other,
                total,
            } => Equation::Linear {
                terms: vec![(1, glyph), (1, other)],
                constant: total,
            },
            Clue::TripleSum {
                first,
                second,
                glyph,
                total,
            } => Equation::Linear {
                terms: vec![(1, first), (1, second), (1, glyph)],
                constant: total,
            },
            Clue::Combination {
                terms: [first, second],
                glyph,
            } => Equation::Linear {
                terms: vec![first, second, (-1, glyph)],
                constant: 0,
            },
            Clue::Scaled {
                glyph,
                multiplier,
                other,
                total,
                ..
            } => Equation::Linear {
                terms: vec![(multiplier, glyph), (1, other)],
                constant: total,
            },
            Clue::Question { .. } => return None,
        };
        Some(equation)
    }
}

impl Display for Clue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (plus, minus, times) = (Operator::Add, Operator::Subtract, Operator::Multiply);
        match *self {
            Clue::Square { glyph, product } => {
                write!(f, "{} {} {} = {}", glyph, times, glyph, product)
            }
            Clue::Sum {
                glyph,
                other,
                total,
            } => write!(f, "{} {} {} = {}", glyph, plus, other, total),
            Clue::TripleSum {
                first,
                second,
                glyph,
                total,
            } => write!(
                f,
                "{} {} {} {} {} = {}",
                first, plus, second, plus, glyph, total
            ),
            Clue::Combination {
                terms: [(m1, first), (m2, second)],
                glyph,
            } => write!(
                f,
                "({} {} {}) {} ({} {} {}) = {}",
                m1, times, first, plus, m2, times, second, glyph
            ),
            Clue::Scaled {
                glyph,
                multiplier,
                other,
                total,
                layout,
            } => {
                let scaled = format!("({} {} {})", multiplier, times, glyph);
                match layout {
                    ScaledLayout::ScaledFirst => {
                        write!(f, "{} {} {} = {}", scaled, plus, other, total)
                    }
                    ScaledLayout::ScaledLast => {
                        write!(f, "{} {} {} = {}", other, plus, scaled, total)
                    }
                    ScaledLayout::Isolated => {
                        write!(f, "{} = {} {} {}", scaled, total, minus, other)
                    }
                    ScaledLayout::Reversed => {
                        write!(f, "{} {} {} = {}", total, minus, other, scaled)
                    }
                }
            }
            Clue::Question { glyph } => write!(f, "{} = ?", glyph),
        }
    }
}

impl Serialize for Clue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
