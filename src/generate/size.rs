//! Choose how many glyphs a puzzle has

use std::ops::RangeInclusive;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::ConfigurationError;
use crate::sequence::SequenceSource;

/// Sizes drawn uniformly when no difficulty range is given
pub const DEFAULT_SIZES: RangeInclusive<usize> = 4..=5;

pub(super) fn default_size(source: &mut SequenceSource) -> usize {
    source.gen_range(*DEFAULT_SIZES.start(), *DEFAULT_SIZES.end() + 1)
}

/// Weight of `size` within `min..=max`, largest in the middle of the range.
/// `size` must lie within the range.
fn size_weight(min: usize, max: usize, size: usize) -> usize {
    (size - min + 1) * (max - size + 1)
}

pub(super) fn weighted_size(
    sizes: &RangeInclusive<usize>,
    source: &mut SequenceSource,
) -> Result<usize, ConfigurationError> {
    let (min, max) = (*sizes.start(), *sizes.end());
    let weights = sizes.clone().map(|size| size_weight(min, max, size));
    let distribution = WeightedIndex::<usize>::new(weights)
        .map_err(|_| ConfigurationError::RangeInverted { min, max })?;
    Ok(min + distribution.sample(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights() {
        let weights: Vec<usize> = (3..=9).map(|size| size_weight(3, 9, size)).collect();
        assert_eq!(vec![7, 12, 15, 16, 15, 12, 7], weights);
        assert_eq!(1, size_weight(4, 4, 4));
    }

    #[test]
    fn weighted_size_in_range() {
        let mut source = SequenceSource::new(5);
        for _ in 0..1000 {
            let size = weighted_size(&(3..=9), &mut source).unwrap();
            assert!((3..=9).contains(&size));
        }
        assert_eq!(6, weighted_size(&(6..=6), &mut source).unwrap());
    }

    #[test]
    fn weighted_size_peaks_in_the_middle() {
        let mut source = SequenceSource::new(11);
        let mut counts = [0_usize; 10];
        for _ in 0..10_000 {
            counts[weighted_size(&(3..=9), &mut source).unwrap()] += 1;
        }
        assert!(counts[6] > counts[3] * 3 / 2);
        assert!(counts[6] > counts[9] * 3 / 2);
        assert!(counts[3] > 0 && counts[9] > 0);
    }

    #[test]
    fn inverted_range() {
        let mut source = SequenceSource::new(0);
        let sizes = RangeInclusive::new(5, 4);
        assert_eq!(
            Err(ConfigurationError::RangeInverted { min: 5, max: 4 }),
            weighted_size(&sizes, &mut source)
        );
    }

    #[test]
    fn default_size_spread() {
        let mut source = SequenceSource::new(0);
        for _ in 0..100 {
            assert!(DEFAULT_SIZES.contains(&default_size(&mut source)));
        }
    }
}
