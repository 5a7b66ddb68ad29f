//! Deduce glyph values from clues, the way a player would

use std::convert::TryFrom;

use ahash::AHashMap;
use linked_hash_map::LinkedHashMap;
use linked_hash_set::LinkedHashSet;

use crate::error::SolveError;
use crate::puzzle::{Clue, Equation, Glyph, Value};

type ALinkedHashSet<T> = LinkedHashSet<T, ahash::RandomState>;

/// The values deduced from a set of clues
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// in the order they were deduced
    values: LinkedHashMap<Glyph, Value>,
    answer: Option<Value>,
}

impl Solution {
    pub fn value(&self, glyph: Glyph) -> Option<Value> {
        self.values.get(&glyph).copied()
    }

    pub fn values(&self) -> &LinkedHashMap<Glyph, Value> {
        &self.values
    }

    /// The order in which glyphs were deduced
    pub fn order(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.values.keys().copied()
    }

    /// The value asked for by the question clue, if there is one
    pub fn answer(&self) -> Option<Value> {
        self.answer
    }
}

/// Repeatedly solves any clue with exactly one unknown glyph until every glyph is known
pub struct Solver<'a> {
    equations: Vec<(&'a Clue, Equation)>,
    question: Option<Glyph>,
    unknown: ALinkedHashSet<Glyph>,
    known: AHashMap<Glyph, Value>,
    order: Vec<Glyph>,
}

impl<'a> Solver<'a> {
    pub fn new(clues: &'a [Clue]) -> Self {
        let equations: Vec<_> = clues
            .iter()
            .filter_map(|clue| clue.equation().map(|equation| (clue, equation)))
            .collect();
        let question = clues
            .iter()
            .find(|clue| clue.is_question())
            .map(Clue::glyph);
        let mut unknown = ALinkedHashSet::with_hasher(Default::default());
        unknown.extend(clues.iter().flat_map(Clue::glyphs));
        Self {
            equations,
            question,
            unknown,
            known: AHashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn solve(mut self) -> Result<Solution, SolveError> {
        while !self.unknown.is_empty() {
            let next = self
                .equations
                .iter()
                .find_map(|(clue, equation)| self.deduce(clue, equation).transpose());
            match next {
                Some(deduction) => {
                    let (glyph, value) = deduction?;
                    self.learn(glyph, value);
                }
                None => {
                    return Err(SolveError::Unsolvable {
                        unsolved: self.unknown.iter().copied().collect(),
                    })
                }
            }
        }
        self.check()?;
        let answer = self
            .question
            .and_then(|glyph| self.known.get(&glyph).copied());
        let values = self
            .order
            .iter()
            .map(|glyph| (*glyph, self.known[glyph]))
            .collect();
        Ok(Solution { values, answer })
    }

    fn learn(&mut self, glyph: Glyph, value: Value) {
        trace!("{} = {}", glyph, value);
        self.unknown.remove(&glyph);
        self.known.insert(glyph, value);
        self.order.push(glyph);
    }

    /// Solves a clue that has exactly one unknown glyph
    fn deduce(
        &self,
        clue: &Clue,
        equation: &Equation,
    ) -> Result<Option<(Glyph, Value)>, SolveError> {
        match *equation {
            Equation::Square { glyph, product } => {
                if self.known.contains_key(&glyph) {
                    return Ok(None);
                }
                let root = integer_sqrt(product)
                    .filter(|&root| root > 0)
                    .ok_or_else(|| unsatisfiable(glyph, clue))?;
                Ok(Some((glyph, root)))
            }
            Equation::Linear {
                ref terms,
                constant,
            } => {
                let mut unknown = None;
                let mut coefficient = 0_i64;
                let mut rest = i64::from(constant);
                for &(c, glyph) in terms {
                    if let Some(&value) = self.known.get(&glyph) {
                        rest -= i64::from(c) * i64::from(value);
                        continue;
                    }
                    match unknown {
                        Some(other) if other != glyph => return Ok(None),
                        _ => {
                            unknown = Some(glyph);
                            coefficient += i64::from(c);
                        }
                    }
                }
                let glyph = match unknown {
                    Some(glyph) => glyph,
                    None => return Ok(None),
                };
                if coefficient == 0 || rest % coefficient != 0 || rest / coefficient <= 0 {
                    return Err(unsatisfiable(glyph, clue));
                }
                let value =
                    Value::try_from(rest / coefficient).map_err(|_| unsatisfiable(glyph, clue))?;
                Ok(Some((glyph, value)))
            }
        }
    }

    /// Every clue must hold for the deduced values
    fn check(&self) -> Result<(), SolveError> {
        for (clue, equation) in &self.equations {
            let holds = match *equation {
                Equation::Square { glyph, product } => {
                    let value = i64::from(self.known[&glyph]);
                    value * value == i64::from(product)
                }
                Equation::Linear {
                    ref terms,
                    constant,
                } => {
                    let sum: i64 = terms
                        .iter()
                        .map(|&(c, glyph)| i64::from(c) * i64::from(self.known[&glyph]))
                        .sum();
                    sum == i64::from(constant)
                }
            };
            if !holds {
                return Err(SolveError::Contradiction {
                    clue: clue.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn unsatisfiable(glyph: Glyph, clue: &Clue) -> SolveError {
    SolveError::Unsatisfiable {
        glyph,
        clue: clue.to_string(),
    }
}

fn integer_sqrt(n: Value) -> Option<Value> {
    if n < 0 {
        return None;
    }
    let root = f64::from(n).sqrt().round() as i64;
    if root * root == i64::from(n) {
        Value::try_from(root).ok()
    } else {
        None
    }
}
