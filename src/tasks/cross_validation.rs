use crate::classifiers::Classifier;
use crate::config::{ConfigError, CrossValidationConfig, PartitionStrategy};
use crate::core::Dataset;
use crate::evaluation::{FinalizedStats, Report, StatsAccumulator};
use crate::tasks::Harness;
use crate::utils::LogSink;
use crate::utils::partitions::{self, PartitionError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrossValidationError<E> {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error("classifier failed on fold {fold}")]
    Classifier {
        fold: usize,
        #[source]
        source: E,
    },
}

/// Everything a k-fold run produced.
///
/// Serializes to the reports only; the finalized stats themselves are kept
/// for callers that want more than [`FinalizedStats::full_stats`].
#[derive(Debug, Serialize)]
pub struct CrossValidationOutcome<F> {
    #[serde(skip)]
    pub folds: Vec<F>,
    pub fold_reports: Vec<Report>,
    #[serde(skip)]
    pub micro_average: F,
    pub micro_report: Report,
    pub macro_sum: Report,
    pub macro_average: Report,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl<S: LogSink> Harness<S> {
    /// k-fold cross-validation of the classifiers built by
    /// `create_classifier`.
    ///
    /// Every fold trains a brand new classifier. All folds share one micro
    /// accumulator, finalized once at the end, and one macro sum, averaged
    /// over the number of folds.
    pub fn cross_validate<C, A, F>(
        &mut self,
        mut create_classifier: F,
        dataset: &Dataset<C::Input, C::Label>,
        config: &CrossValidationConfig,
    ) -> Result<CrossValidationOutcome<A::Finalized>, CrossValidationError<C::Error>>
    where
        C: Classifier,
        C::Input: Clone + Debug,
        C::Label: Clone + Debug,
        A: StatsAccumulator<C::Label>,
        F: FnMut() -> Result<C, C::Error>,
    {
        config.validate()?;
        let splits = match config.partitioning {
            PartitionStrategy::Consecutive => partitions::consecutive(dataset, config.folds)?,
            PartitionStrategy::Shuffled => {
                partitions::shuffled(dataset, config.folds, config.seed.unwrap_or(0))?
            }
        };

        let started_at = Utc::now();
        let verbosity = config.verbosity;
        let mut micro = A::default();
        let mut macro_sum = Report::new();
        let mut folds = Vec::with_capacity(splits.len());

        for split in &splits {
            if verbosity > 0 {
                self.log_mut().line(&format!(
                    "fold {}/{}: train {}, test {}",
                    split.index + 1,
                    splits.len(),
                    split.train.len(),
                    split.test.len()
                ));
            }
            let stats = self
                .train_and_test::<C, A, _>(
                    &mut create_classifier,
                    &split.train,
                    &split.test,
                    verbosity,
                    Some(&mut micro),
                    Some(&mut macro_sum),
                )
                .map_err(|source| CrossValidationError::Classifier {
                    fold: split.index,
                    source,
                })?;
            folds.push(stats);
        }

        let micro_average = micro.calculate_stats();
        let macro_average = macro_sum.scaled(1.0 / splits.len() as f64);
        if verbosity > 0 {
            self.log_mut()
                .line(&format!("MICRO AVERAGE: {}", micro_average.short_stats()));
            self.log_mut()
                .line(&format!("MACRO AVERAGE: {}", macro_average.to_pretty_json()));
        }

        Ok(CrossValidationOutcome {
            fold_reports: folds.iter().map(FinalizedStats::full_stats).collect(),
            folds,
            micro_report: micro_average.full_stats(),
            micro_average,
            macro_sum,
            macro_average,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CaseLog, RecordingSink, SpyHandle, StubError, parity};
    use std::error::Error;

    type Log = CaseLog<String>;

    fn config(folds: usize) -> CrossValidationConfig {
        CrossValidationConfig {
            folds,
            ..CrossValidationConfig::default()
        }
    }

    #[test]
    fn one_fresh_classifier_per_fold() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        let out = h
            .cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(10), &config(5))
            .unwrap();

        assert_eq!(out.folds.len(), 5);
        assert_eq!(spy.created(), 5);
        assert_eq!(spy.trained(), 5);
        assert_eq!(spy.classified(), 10);
    }

    #[test]
    fn micro_sees_every_sample_and_macro_sums_folds() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        let out = h
            .cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(9), &config(3))
            .unwrap();

        assert_eq!(out.micro_average.cases().len(), 9);
        let tested: usize = out.folds.iter().map(|f| f.cases().len()).sum();
        assert_eq!(tested, 9);

        let mut expected = Report::new();
        for r in &out.fold_reports {
            expected.merge_add(r);
        }
        assert_eq!(out.macro_sum, expected);
        assert_eq!(out.macro_sum.get("cases"), Some(9.0));
        assert!((out.macro_average.get("cases").unwrap() - 3.0).abs() < 1e-12);
        assert!(out.finished_at >= out.started_at);
    }

    #[test]
    fn held_out_samples_are_unknown_to_the_table() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        let out = h
            .cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(6), &config(2))
            .unwrap();
        assert_eq!(out.micro_report.get("correct"), Some(0.0));
        assert!(
            out.micro_average
                .cases()
                .iter()
                .all(|(_, actual)| actual == "?")
        );
    }

    #[test]
    fn shuffled_runs_are_reproducible() {
        let cfg = CrossValidationConfig {
            folds: 3,
            partitioning: PartitionStrategy::Shuffled,
            seed: Some(7),
            ..CrossValidationConfig::default()
        };
        let run = || {
            let spy = SpyHandle::default();
            let mut h = Harness::new(RecordingSink::default());
            h.cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(12), &cfg)
                .unwrap()
                .micro_average
                .cases()
                .to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn logs_fold_headers_and_averages() {
        let spy = SpyHandle::default();
        let cfg = CrossValidationConfig {
            verbosity: 1,
            ..config(2)
        };
        let mut h = Harness::new(RecordingSink::default());
        h.cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(4), &cfg)
            .unwrap();

        let log = h.log();
        assert_eq!(log.lines()[0], "fold 1/2: train 2, test 2");
        assert!(log.contains("fold 2/2: train 2, test 2"));
        assert!(log.contains("MICRO AVERAGE: 0/4 correct"));
        assert!(log.contains("MACRO AVERAGE:"));
    }

    #[test]
    fn silent_at_verbosity_zero() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        h.cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(4), &config(2))
            .unwrap();
        assert!(h.log().lines().is_empty());
    }

    #[test]
    fn too_few_samples_is_a_partition_error() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        let err = h
            .cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(2), &config(3))
            .unwrap_err();
        assert!(matches!(
            err,
            CrossValidationError::Partition(PartitionError::TooFewSamples { .. })
        ));
        assert_eq!(spy.created(), 0);
    }

    #[test]
    fn invalid_config_is_rejected_before_partitioning() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        let err = h
            .cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(4), &config(1))
            .unwrap_err();
        assert!(matches!(err, CrossValidationError::Config(_)));
    }

    #[test]
    fn seed_with_consecutive_partitioning_is_a_config_error() {
        let spy = SpyHandle::default();
        let cfg = CrossValidationConfig {
            seed: Some(3),
            ..config(2)
        };
        let mut h = Harness::new(RecordingSink::default());
        let err = h
            .cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(4), &cfg)
            .unwrap_err();
        assert!(matches!(err, CrossValidationError::Config(_)));
        assert_eq!(spy.created(), 0);
    }

    #[test]
    fn classifier_error_keeps_fold_and_source() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        let err = h
            .cross_validate::<_, Log, _>(
                || Ok(spy.spawn().failing_on("4")),
                &parity(6),
                &config(3),
            )
            .unwrap_err();

        match &err {
            CrossValidationError::Classifier { fold, source } => {
                assert_eq!(*fold, 1);
                assert_eq!(*source, StubError::Unclassifiable("4".into()));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.source().is_some());
        assert_eq!(spy.created(), 2);
    }

    #[test]
    fn outcome_serializes_reports_only() {
        let spy = SpyHandle::default();
        let mut h = Harness::new(RecordingSink::default());
        let out = h
            .cross_validate::<_, Log, _>(|| Ok(spy.spawn()), &parity(4), &config(2))
            .unwrap();
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["fold_reports"].as_array().unwrap().len(), 2);
        assert_eq!(v["macro_sum"]["cases"], 4.0);
        assert!(v.get("folds").is_none());
        assert!(v.get("started_at").is_some());
    }
}
