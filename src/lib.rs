pub mod classifiers;
pub mod config;
pub mod core;
pub mod evaluation;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use crate::classifiers::Classifier;
pub use crate::core::{Dataset, Sample};
pub use crate::evaluation::{CaseRecorder, FinalizedStats, Measurement, Report, StatsAccumulator};
pub use crate::tasks::{Harness, test, train_and_test};
