use crate::utils::LogSink;

/// Keeps every emitted line in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    lines: Vec<String>,
}

impl RecordingSink {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl LogSink for RecordingSink {
    fn line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
