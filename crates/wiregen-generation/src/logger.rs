//! Generation event sinks

use parking_lot::Mutex;
use tracing::{debug, error};

/// Receives progress and failure events from a generation run
pub trait GenerationLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl GenerationLogger for TracingLogger {
    fn debug(&self, message: &str) {
        debug!(target: "wiregen::generation", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "wiregen::generation", "{}", message);
    }
}

/// Discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl GenerationLogger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Messages of error events, in order
    pub fn errors(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.level == LogLevel::Error)
            .map(|event| event.message.clone())
            .collect()
    }

    fn record(&self, level: LogLevel, message: &str) {
        self.events.lock().push(LogEvent {
            level,
            message: message.to_string(),
        });
    }
}

impl GenerationLogger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }

    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }
}
