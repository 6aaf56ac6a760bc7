//! Lifecycle events
//!
//! Events are explicit and typed. The string form is the `event` key of
//! the log line.

use std::fmt;

/// Observable events in the service lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    ServerStart,
    ServerListening,
    ShutdownStart,
    ShutdownComplete,

    // Configuration
    ConfigLoaded,

    // Storage
    StorageOpened,
    StorageSaved,
    StorageSaveFailed,
    StorageCloseFailed,

    // Requests
    RequestServed,
    RequestFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ServerStart => "SERVER_START",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StorageOpened => "STORAGE_OPENED",
            Event::StorageSaved => "STORAGE_SAVED",
            Event::StorageSaveFailed => "STORAGE_SAVE_FAILED",
            Event::StorageCloseFailed => "STORAGE_CLOSE_FAILED",
            Event::RequestServed => "REQUEST_SERVED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> super::Severity {
        use super::Severity;
        match self {
            Event::RequestServed => Severity::Trace,
            Event::StorageCloseFailed => Severity::Warn,
            Event::StorageSaveFailed | Event::RequestFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
