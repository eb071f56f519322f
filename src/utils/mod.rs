pub mod logging;
pub mod partitions;

pub use logging::{LogFacadeSink, LogSink, StdoutSink};
