use crate::core::Dataset;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("at least 2 folds are required, got {0}")]
    TooFewFolds(usize),

    #[error("cannot split {samples} samples into {folds} folds")]
    TooFewSamples { samples: usize, folds: usize },
}

/// One train/test split of a dataset.
#[derive(Debug, Clone)]
pub struct Fold<T, L> {
    pub index: usize,
    pub train: Dataset<T, L>,
    pub test: Dataset<T, L>,
}

/// Splits `dataset` into `folds` consecutive test slices.
///
/// Fold `i` tests on the `i`-th slice of `len / folds` samples (the last
/// fold also takes the remainder) and trains on everything else, in
/// original order.
pub fn consecutive<T: Clone, L: Clone>(
    dataset: &Dataset<T, L>,
    folds: usize,
) -> Result<Vec<Fold<T, L>>, PartitionError> {
    let order: Vec<usize> = (0..dataset.len()).collect();
    split(dataset, &order, folds)
}

/// Same as [`consecutive`], over a permutation of the samples drawn from a
/// seeded RNG. Equal seeds give equal folds.
pub fn shuffled<T: Clone, L: Clone>(
    dataset: &Dataset<T, L>,
    folds: usize,
    seed: u64,
) -> Result<Vec<Fold<T, L>>, PartitionError> {
    let mut order: Vec<usize> = (0..dataset.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    split(dataset, &order, folds)
}

fn check(samples: usize, folds: usize) -> Result<(), PartitionError> {
    if folds < 2 {
        return Err(PartitionError::TooFewFolds(folds));
    }
    if folds > samples {
        return Err(PartitionError::TooFewSamples { samples, folds });
    }
    Ok(())
}

fn split<T: Clone, L: Clone>(
    dataset: &Dataset<T, L>,
    order: &[usize],
    folds: usize,
) -> Result<Vec<Fold<T, L>>, PartitionError> {
    check(order.len(), folds)?;

    let size = order.len() / folds;
    let out = (0..folds)
        .map(|index| {
            let start = index * size;
            let end = if index + 1 == folds {
                order.len()
            } else {
                start + size
            };
            let train: Vec<usize> = order[..start]
                .iter()
                .chain(&order[end..])
                .copied()
                .collect();
            Fold {
                index,
                train: dataset.select(&train),
                test: dataset.select(&order[start..end]),
            }
        })
        .collect();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Sample;

    fn numbers(n: usize) -> Dataset<usize, usize> {
        (0..n).map(|i| Sample::new(i, i % 3)).collect()
    }

    fn inputs(d: &Dataset<usize, usize>) -> Vec<usize> {
        d.iter().map(|s| s.input).collect()
    }

    #[test]
    fn guards() {
        let d = numbers(3);
        assert_eq!(
            consecutive(&d, 1).unwrap_err(),
            PartitionError::TooFewFolds(1)
        );
        assert_eq!(
            consecutive(&d, 4).unwrap_err(),
            PartitionError::TooFewSamples {
                samples: 3,
                folds: 4
            }
        );
    }

    #[test]
    fn consecutive_slices_and_remainder() {
        let folds = consecutive(&numbers(7), 3).unwrap();
        assert_eq!(folds.len(), 3);
        assert_eq!(inputs(&folds[0].test), vec![0, 1]);
        assert_eq!(inputs(&folds[0].train), vec![2, 3, 4, 5, 6]);
        assert_eq!(inputs(&folds[1].test), vec![2, 3]);
        assert_eq!(inputs(&folds[1].train), vec![0, 1, 4, 5, 6]);
        assert_eq!(inputs(&folds[2].test), vec![4, 5, 6]);
        assert_eq!(inputs(&folds[2].train), vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_sample_tested_once_and_never_trained_on_in_its_fold() {
        let d = numbers(10);
        for folds in [consecutive(&d, 4).unwrap(), shuffled(&d, 4, 17).unwrap()] {
            let mut tested: Vec<usize> = folds.iter().flat_map(|f| inputs(&f.test)).collect();
            tested.sort_unstable();
            assert_eq!(tested, (0..10).collect::<Vec<_>>());
            for f in &folds {
                assert_eq!(f.train.len() + f.test.len(), 10);
                for x in inputs(&f.test) {
                    assert!(!inputs(&f.train).contains(&x));
                }
            }
        }
    }

    #[test]
    fn shuffled_is_reproducible_per_seed() {
        let d = numbers(20);
        let a = shuffled(&d, 5, 42).unwrap();
        let b = shuffled(&d, 5, 42).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(inputs(&x.test), inputs(&y.test));
        }
    }

    #[test]
    fn folds_inherit_class_annotation() {
        let d = numbers(4).with_all_classes(["0", "1", "2"]);
        for f in consecutive(&d, 2).unwrap() {
            assert_eq!(f.train.all_classes().unwrap().len(), 3);
            assert_eq!(f.test.all_classes().unwrap().len(), 3);
        }
    }
}
