//! Observable events
//!
//! Event names are explicit and typed; log lines use `as_str()`.

use std::fmt;

use super::logger::{Logger, Severity};

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Configuration fell back to defaults
    ConfigDefaulted,

    // Requests
    /// Request line read
    RequestReceived,
    /// Request failed validation
    RequestRejected,
    /// Request answered
    RequestCompleted,

    // Engine
    /// Query executed (per call, TRACE)
    QueryExecuted,
    /// Missing amounts replaced by the configured default
    AmountsDefaulted,

    // Serve loop
    /// Serve loop ready
    Serving,
    /// Input exhausted, loop ending
    ServeComplete,

    // Process
    /// Command ended with a config or I/O error
    CommandFailed,
}

impl Event {
    /// Returns the event name as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigDefaulted => "CONFIG_DEFAULTED",
            Event::RequestReceived => "REQUEST_RECEIVED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::RequestCompleted => "REQUEST_COMPLETED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::AmountsDefaulted => "AMOUNTS_DEFAULTED",
            Event::Serving => "SERVING",
            Event::ServeComplete => "SERVE_COMPLETE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Severity this event is normally logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryExecuted | Event::RequestReceived => Severity::Trace,
            Event::RequestRejected | Event::ConfigDefaulted => Severity::Warn,
            Event::CommandFailed => Severity::Fatal,
            _ => Severity::Info,
        }
    }

    /// Logs this event at its normal severity
    pub fn log(&self, fields: &[(&str, &str)]) {
        Logger::log(self.severity(), self.as_str(), fields);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_screaming_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::ConfigDefaulted,
            Event::RequestReceived,
            Event::RequestRejected,
            Event::RequestCompleted,
            Event::QueryExecuted,
            Event::AmountsDefaulted,
            Event::Serving,
            Event::ServeComplete,
            Event::CommandFailed,
        ];

        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
            assert_eq!(event.to_string(), name);
        }
    }

    #[test]
    fn test_query_executed_is_trace() {
        assert_eq!(Event::QueryExecuted.severity(), Severity::Trace);
        assert_eq!(Event::RequestRejected.severity(), Severity::Warn);
        assert_eq!(Event::CommandFailed.severity(), Severity::Fatal);
    }
}
