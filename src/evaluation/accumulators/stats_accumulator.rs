use crate::evaluation::Report;
use crate::utils::LogSink;

/// Anything that can take one sample outcome at a time.
///
/// `verbosity` is the caller's level already decremented for this layer;
/// implementations only log when it is positive.
pub trait CaseRecorder<L: ?Sized> {
    /// Records one sample's expected and predicted labels.
    fn add_cases(&mut self, expected: &L, actual: &L, verbosity: i32, log: &mut dyn LogSink);
}

/// Statistics for a single run, in its accumulating phase.
///
/// A fresh run starts from [`Default`]. [`calculate_stats`] consumes the
/// accumulator, so no case can be recorded after finalization and no report
/// can be read before it.
///
/// [`calculate_stats`]: StatsAccumulator::calculate_stats
pub trait StatsAccumulator<L: ?Sized>: CaseRecorder<L> + Default {
    type Finalized: FinalizedStats;

    fn calculate_stats(self) -> Self::Finalized;
}

/// Read side of a finalized run.
pub trait FinalizedStats {
    /// Detailed measurements, suitable for merging into a macro sum.
    fn full_stats(&self) -> Report;

    /// One-line human readable summary.
    fn short_stats(&self) -> String;
}

impl<L: ?Sized, R: CaseRecorder<L> + ?Sized> CaseRecorder<L> for &mut R {
    fn add_cases(&mut self, expected: &L, actual: &L, verbosity: i32, log: &mut dyn LogSink) {
        (**self).add_cases(expected, actual, verbosity, log)
    }
}
