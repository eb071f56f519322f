mod accumulators;
mod measurement;
mod report;

pub use accumulators::{CaseRecorder, FinalizedStats, StatsAccumulator};
pub use measurement::Measurement;
pub use report::Report;
