/// Destination for the plain-text lines the harness emits.
///
/// How much gets written is decided by the callers through their verbosity
/// argument; a sink only decides where lines go.
pub trait LogSink {
    fn line(&mut self, line: &str);
}

/// Writes every line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Forwards every line to the `log` facade at `info` level.
#[derive(Debug, Clone, Copy)]
pub struct LogFacadeSink {
    target: &'static str,
}

impl LogFacadeSink {
    pub const DEFAULT_TARGET: &'static str = "traintest";

    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }
}

impl Default for LogFacadeSink {
    fn default() -> Self {
        Self::with_target(Self::DEFAULT_TARGET)
    }
}

impl LogSink for LogFacadeSink {
    fn line(&mut self, line: &str) {
        log::info!(target: self.target, "{line}");
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn line(&mut self, line: &str) {
        (**self).line(line)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn line(&mut self, line: &str) {
        (**self).line(line)
    }
}
