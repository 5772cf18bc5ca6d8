//! Log sink handed to the diagnostics runner and HTTP handlers.
//!
//! Components never reach for a global logger directly; they write through the
//! `LogSink` they were constructed with. [`TracingSink`] is the production sink,
//! [`MemorySink`] captures records so callers can assert on them.

use std::sync::Mutex;

use tracing::Level;

/// Destination for diagnostics output.
pub trait LogSink: Send + Sync {
    fn record(&self, level: Level, step: &str, message: &str);

    fn info(&self, step: &str, message: &str) {
        self.record(Level::INFO, step, message);
    }

    fn warn(&self, step: &str, message: &str) {
        self.record(Level::WARN, step, message);
    }

    fn error(&self, step: &str, message: &str) {
        self.record(Level::ERROR, step, message);
    }
}

/// Forwards every record to `tracing` with the step as a structured field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, level: Level, step: &str, message: &str) {
        match level {
            Level::ERROR => tracing::error!(step = %step, "{}", message),
            Level::WARN => tracing::warn!(step = %step, "{}", message),
            Level::INFO => tracing::info!(step = %step, "{}", message),
            Level::DEBUG => tracing::debug!(step = %step, "{}", message),
            Level::TRACE => tracing::trace!(step = %step, "{}", message),
        }
    }
}

/// One captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub step: String,
    pub message: String,
}

/// Captures records in memory, and optionally forwards them to tracing as well.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
    forward: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that also forwards to [`TracingSink`].
    pub fn forwarding() -> Self {
        Self {
            records: Mutex::default(),
            forward: true,
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages recorded for `step`, in order.
    pub fn messages(&self, step: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.step == step)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Distinct step names in first-seen order.
    pub fn steps(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for record in self.lock().iter() {
            if !seen.contains(&record.step) {
                seen.push(record.step.clone());
            }
        }
        seen
    }

    pub fn contains(&self, step: &str, message: &str) -> bool {
        self.lock()
            .iter()
            .any(|r| r.step == step && r.message == message)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        // A panic while holding the lock leaves the Vec intact.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn record(&self, level: Level, step: &str, message: &str) {
        if self.forward {
            TracingSink.record(level, step, message);
        }
        self.lock().push(LogRecord {
            level,
            step: step.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.info("a", "first");
        sink.error("b", "second");
        sink.info("a", "third");

        assert_eq!(sink.messages("a"), vec!["first", "third"]);
        assert_eq!(sink.steps(), vec!["a", "b"]);
        assert!(sink.contains("b", "second"));
        assert_eq!(sink.records()[1].level, Level::ERROR);
    }

    #[test]
    fn test_sinks_are_object_safe() {
        let sinks: Vec<Box<dyn LogSink>> = vec![
            Box::new(TracingSink) as Box<dyn LogSink>,
            Box::new(MemorySink::forwarding()),
        ];
        for sink in &sinks {
            sink.warn("test", "ok");
        }
    }
}
