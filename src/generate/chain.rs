//! Builds clues backwards through the solve order.
//!
//! The last glyph in solve order gets a self-square clue. Every glyph before it gets a clue that
//! only depends on glyphs after it, so a solver can work forwards from the self-square.

use linked_hash_map::LinkedHashMap;
use rand::Rng;

use crate::generate::Tuning;
use crate::puzzle::{Clue, Glyph, ScaledLayout, Value};
use crate::sequence::SequenceSource;

const MIN_MULTIPLIER: Value = 2;
const MAX_MULTIPLIER: Value = 3;

pub(super) fn build(
    solve_order: &[Glyph],
    values: LinkedHashMap<Glyph, Value>,
    budget: u32,
    tuning: &Tuning,
    source: &mut SequenceSource,
) -> (Vec<Clue>, LinkedHashMap<Glyph, Value>) {
    let mut builder = ChainBuilder {
        values,
        known: Vec::with_capacity(solve_order.len()),
        budget,
        tuning,
        source,
    };
    let clues = solve_order
        .iter()
        .rev()
        .map(|&glyph| builder.next_clue(glyph))
        .collect();
    (clues, builder.values)
}

struct ChainBuilder<'a> {
    values: LinkedHashMap<Glyph, Value>,
    /// glyphs that already have a clue, in the order they were given one
    known: Vec<Glyph>,
    /// compound clues left
    budget: u32,
    tuning: &'a Tuning,
    source: &'a mut SequenceSource,
}

impl ChainBuilder<'_> {
    fn next_clue(&mut self, glyph: Glyph) -> Clue {
        let clue = if self.known.is_empty() {
            let value = self.value(glyph);
            Clue::Square {
                glyph,
                product: value * value,
            }
        } else if self.known.len() >= 2
            && self.budget > 0
            && self.source.chance(self.tuning.two_dependency_chance)
        {
            self.two_dependency_clue(glyph)
        } else {
            self.one_dependency_clue(glyph)
        };
        debug!("{}", clue);
        self.known.push(glyph);
        clue
    }

    /// Redefines the glyph as a combination of two known glyphs, or falls back to a sum of all
    /// three
    fn two_dependency_clue(&mut self, glyph: Glyph) -> Clue {
        let (first, second) = self.two_known();
        let (m1, m2) = (self.multiplier(), self.multiplier());
        let combined = m1 * self.value(first) + m2 * self.value(second);
        if combined < self.tuning.value_ceiling && !self.values.values().any(|&v| v == combined) {
            if let Some(value) = self.values.get_mut(&glyph) {
                *value = combined;
            }
            self.budget -= 1;
            Clue::Combination {
                terms: [(m1, first), (m2, second)],
                glyph,
            }
        } else {
            debug!("{} can not be {}, falling back to a sum", glyph, combined);
            Clue::TripleSum {
                first,
                second,
                glyph,
                total: self.value(first) + self.value(second) + self.value(glyph),
            }
        }
    }

    fn one_dependency_clue(&mut self, glyph: Glyph) -> Clue {
        let other = self.one_known();
        let multiplier = self.multiplier();
        let (value, other_value) = (self.value(glyph), self.value(other));
        if self.budget > 0 && self.source.chance(self.tuning.scaled_chance) {
            self.budget -= 1;
            Clue::Scaled {
                glyph,
                multiplier,
                other,
                total: multiplier * value + other_value,
                layout: self.scaled_layout(),
            }
        } else {
            Clue::Sum {
                glyph,
                other,
                total: value + other_value,
            }
        }
    }

    fn scaled_layout(&mut self) -> ScaledLayout {
        let roll = self.source.next_fraction();
        if roll < 1.0 / 3.0 {
            if self.source.chance(0.5) {
                ScaledLayout::ScaledFirst
            } else {
                ScaledLayout::ScaledLast
            }
        } else if roll < 2.0 / 3.0 {
            ScaledLayout::Isolated
        } else {
            ScaledLayout::Reversed
        }
    }

    fn one_known(&mut self) -> Glyph {
        let index = self.source.gen_range(0, self.known.len());
        self.known[index]
    }

    /// Two distinct known glyphs
    fn two_known(&mut self) -> (Glyph, Glyph) {
        let len = self.known.len();
        let first = self.source.gen_range(0, len);
        let mut second = self.source.gen_range(0, len - 1);
        if second >= first {
            second += 1;
        }
        (self.known[first], self.known[second])
    }

    fn multiplier(&mut self) -> Value {
        self.source.gen_range(MIN_MULTIPLIER, MAX_MULTIPLIER + 1)
    }

    fn value(&self, glyph: Glyph) -> Value {
        self.values[&glyph]
    }
}

#[cfg(test)]
mod tests {
    use linked_hash_map::LinkedHashMap;

    use super::build;
    use crate::generate::Tuning;
    use crate::puzzle::Clue;
    use crate::sequence::SequenceSource;

    fn values() -> LinkedHashMap<char, i32> {
        vec![('■', 5), ('●', 9), ('▲', 2), ('◆', 14), ('★', 11)]
            .into_iter()
            .collect()
    }

    #[test]
    fn last_glyph_seeds_the_chain() {
        let order = ['■', '●', '▲', '◆', '★'];
        let mut source = SequenceSource::new(3);
        let (clues, _) = build(&order, values(), 1, &Tuning::default(), &mut source);
        assert_eq!(
            Clue::Square {
                glyph: '★',
                product: 121
            },
            clues[0]
        );
        let glyphs: Vec<char> = clues.iter().map(Clue::glyph).collect();
        assert_eq!(vec!['★', '◆', '▲', '●', '■'], glyphs);
    }

    #[test]
    fn dependencies_are_already_known() {
        let order = ['■', '●', '▲', '◆', '★'];
        for seed in 0..100 {
            let mut source = SequenceSource::new(seed);
            let (clues, _) = build(&order, values(), 2, &Tuning::default(), &mut source);
            for (i, clue) in clues.iter().enumerate() {
                for dependency in clue.dependencies() {
                    assert!(clues[..i].iter().any(|c| c.glyph() == dependency));
                }
            }
        }
    }

    #[test]
    fn no_budget_means_no_compound_clues() {
        let order = ['■', '●', '▲', '◆', '★'];
        for seed in 0..100 {
            let mut source = SequenceSource::new(seed);
            let (clues, assigned) = build(&order, values(), 0, &Tuning::default(), &mut source);
            assert!(!clues.iter().any(Clue::is_compound));
            assert_eq!(values(), assigned);
        }
    }

    #[test]
    fn combination_redefines_value() {
        let tuning = Tuning {
            two_dependency_chance: 1.0,
            scaled_chance: 0.0,
            ..Tuning::default()
        };
        let order = ['■', '●', '▲'];
        let initial: LinkedHashMap<char, i32> =
            vec![('■', 5), ('●', 9), ('▲', 2)].into_iter().collect();
        for seed in 0..50 {
            let mut source = SequenceSource::new(seed);
            let (clues, values) = build(&order, initial.clone(), 1, &tuning, &mut source);
            match clues[2] {
                Clue::Combination {
                    terms: [(m1, a), (m2, b)],
                    glyph: '■',
                } => assert_eq!(values[&'■'], m1 * values[&a] + m2 * values[&b]),
                Clue::TripleSum { glyph: '■', .. } => assert_eq!(5, values[&'■']),
                ref other => panic!("unexpected clue {}", other),
            }
        }
    }

    #[test]
    fn colliding_combination_falls_back_without_spending_budget() {
        let tuning = Tuning {
            two_dependency_chance: 1.0,
            scaled_chance: 0.0,
            ..Tuning::default()
        };
        let order = ['◈', '■', '●', '▲'];
        // every (m1 × ▲) + (m2 × ●) with m in {2, 3} is already taken
        let initial: LinkedHashMap<char, i32> = vec![
            ('◈', 40),
            ('■', 5),
            ('●', 3),
            ('▲', 2),
            ('◆', 10),
            ('★', 12),
            ('⬟', 13),
            ('✦', 15),
        ]
        .into_iter()
        .collect();
        let mut combinations = 0;
        for seed in 0..50 {
            let mut source = SequenceSource::new(seed);
            let (clues, values) = build(&order, initial.clone(), 1, &tuning, &mut source);
            match clues[2] {
                Clue::TripleSum {
                    glyph: '■',
                    total,
                    ..
                } => assert_eq!(10, total),
                ref other => panic!("seed {}: unexpected clue {}", seed, other),
            }
            assert_eq!(5, values[&'■']);
            // the budget is still there for the next glyph
            match clues[3] {
                Clue::Combination {
                    terms: [(m1, a), (m2, b)],
                    glyph: '◈',
                } => {
                    combinations += 1;
                    assert!(a == '■' || b == '■');
                    assert_eq!(values[&'◈'], m1 * values[&a] + m2 * values[&b]);
                }
                Clue::TripleSum { glyph: '◈', .. } => assert_eq!(40, values[&'◈']),
                ref other => panic!("seed {}: unexpected clue {}", seed, other),
            }
        }
        assert!(combinations > 0);
    }
}
