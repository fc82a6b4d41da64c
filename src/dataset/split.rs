//! Seeded train/test partitioning.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{PolarityError, Result};

/// The two halves of a dataset partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainTestSplit<T> {
    /// Examples used for fitting.
    pub train: Vec<T>,
    /// Held-out examples used for evaluation.
    pub test: Vec<T>,
}

/// Randomly partition `examples` into a train and a test set.
///
/// The test set receives `round(test_fraction * n)` examples chosen by a
/// shuffle seeded with `seed`; every other example goes to the train set.
/// Both halves keep the input's relative order.
///
/// # Errors
///
/// [`PolarityError::InvalidInput`] when `examples` is empty or
/// `test_fraction` is not strictly between 0 and 1.
pub fn split<T: Clone>(examples: &[T], test_fraction: f64, seed: u64) -> Result<TrainTestSplit<T>> {
    if examples.is_empty() {
        return Err(PolarityError::invalid_input("cannot split an empty dataset"));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PolarityError::invalid_input(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let total = examples.len();
    let test_count = (test_fraction * total as f64).round() as usize;

    let mut indices: Vec<usize> = (0..total).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_indices, train_indices) = indices.split_at_mut(test_count);
    test_indices.sort_unstable();
    train_indices.sort_unstable();

    let pick = |idx: &[usize]| idx.iter().map(|&i| examples[i].clone()).collect::<Vec<T>>();

    Ok(TrainTestSplit {
        train: pick(train_indices),
        test: pick(test_indices),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_split_sizes_and_disjointness() {
        let data: Vec<usize> = (0..1000).collect();
        let parts = split(&data, 0.2, 42).unwrap();

        assert_eq!(parts.test.len(), 200);
        assert_eq!(parts.train.len() + parts.test.len(), data.len());

        let train: HashSet<_> = parts.train.iter().collect();
        let test: HashSet<_> = parts.test.iter().collect();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.union(&test).count(), data.len());
    }

    #[test]
    fn test_split_rounds_test_size() {
        let data: Vec<usize> = (0..7).collect();
        // 0.3 * 7 = 2.1
        assert_eq!(split(&data, 0.3, 1).unwrap().test.len(), 2);
        // 0.5 * 7 = 3.5
        assert_eq!(split(&data, 0.5, 1).unwrap().test.len(), 4);
    }

    #[test]
    fn test_split_is_deterministic_per_seed() {
        let data: Vec<usize> = (0..100).collect();
        let a = split(&data, 0.25, 7).unwrap();
        let b = split(&data, 0.25, 7).unwrap();
        let c = split(&data, 0.25, 8).unwrap();

        assert_eq!(a, b);
        assert_ne!(a.test, c.test);
    }

    #[test]
    fn test_split_preserves_relative_order() {
        let data: Vec<usize> = (0..50).collect();
        let parts = split(&data, 0.4, 3).unwrap();
        assert!(parts.train.windows(2).all(|w| w[0] < w[1]));
        assert!(parts.test.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_split_rejects_bad_input() {
        let empty: Vec<u8> = Vec::new();
        assert!(matches!(
            split(&empty, 0.2, 0),
            Err(PolarityError::InvalidInput(_))
        ));

        let data = vec![1, 2, 3];
        for fraction in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                split(&data, fraction, 0),
                Err(PolarityError::InvalidInput(_))
            ));
        }
    }
}
