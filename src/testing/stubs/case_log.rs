use crate::evaluation::{CaseRecorder, FinalizedStats, Report, StatsAccumulator};
use crate::utils::LogSink;
use std::fmt::Debug;

/// Accumulator that keeps the raw `(expected, actual)` pairs.
#[derive(Debug, Clone)]
pub struct CaseLog<L> {
    cases: Vec<(L, L)>,
}

impl<L> CaseLog<L> {
    pub fn cases(&self) -> &[(L, L)] {
        &self.cases
    }
}

impl<L> Default for CaseLog<L> {
    fn default() -> Self {
        Self { cases: vec![] }
    }
}

impl<L: Clone + PartialEq + Debug> CaseRecorder<L> for CaseLog<L> {
    fn add_cases(&mut self, expected: &L, actual: &L, verbosity: i32, log: &mut dyn LogSink) {
        if verbosity > 0 {
            let mark = if expected == actual { "+++" } else { "---" };
            log.line(&format!("\t{mark} {expected:?} -> {actual:?}"));
        }
        self.cases.push((expected.clone(), actual.clone()));
    }
}

impl<L: Clone + PartialEq + Debug> StatsAccumulator<L> for CaseLog<L> {
    type Finalized = CaseLogStats<L>;

    fn calculate_stats(self) -> Self::Finalized {
        let correct = self.cases.iter().filter(|(e, a)| e == a).count();
        CaseLogStats {
            cases: self.cases,
            correct,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaseLogStats<L> {
    cases: Vec<(L, L)>,
    correct: usize,
}

impl<L> CaseLogStats<L> {
    pub fn cases(&self) -> &[(L, L)] {
        &self.cases
    }

    pub fn correct(&self) -> usize {
        self.correct
    }
}

impl<L> FinalizedStats for CaseLogStats<L> {
    fn full_stats(&self) -> Report {
        Report::new()
            .with("cases", self.cases.len() as f64)
            .with("correct", self.correct as f64)
            .with("incorrect", (self.cases.len() - self.correct) as f64)
    }

    fn short_stats(&self) -> String {
        format!("{}/{} correct", self.correct, self.cases.len())
    }
}
