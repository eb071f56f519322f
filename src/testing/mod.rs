pub mod dummies;
pub mod stubs;

pub use dummies::{labeled, parity};
pub use stubs::{
    CaseLog, CaseLogStats, RecordingSink, SpyHandle, StubError, TableClassifier,
};
