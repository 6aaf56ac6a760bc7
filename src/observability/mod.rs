//! Observability for hbnb
//!
//! Structured one-line JSON logs and typed lifecycle events.
//!
//! ```ignore
//! use hbnb::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::log(Severity::Info, "CUSTOM_EVENT", &[("key", "value")]);
//! log_event_with_fields(Event::StorageOpened, &[("backend", "file")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
