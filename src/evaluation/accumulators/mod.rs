mod stats_accumulator;

pub use stats_accumulator::{CaseRecorder, FinalizedStats, StatsAccumulator};
