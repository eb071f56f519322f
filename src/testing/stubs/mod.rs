pub mod case_log;
pub mod recording_sink;
pub mod table_classifier;

pub use case_log::{CaseLog, CaseLogStats};
pub use recording_sink::RecordingSink;
pub use table_classifier::{SpyHandle, StubError, TableClassifier};
