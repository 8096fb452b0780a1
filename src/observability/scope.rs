//! Request scopes for automatic received/completed logging
//!
//! - Logs REQUEST_RECEIVED on creation
//! - Logs REQUEST_COMPLETED or REQUEST_REJECTED when closed
//! - Logs REQUEST_INCOMPLETE on drop if never closed

use std::cell::Cell;
use std::time::Instant;

use uuid::Uuid;

use super::events::Event;
use super::logger::Logger;

/// Tracks one request from receipt to response
///
/// # Usage
///
/// ```ignore
/// let scope = RequestScope::begin();
/// // ... handle ...
/// scope.complete(&[("matching", "12")]);
/// ```
pub struct RequestScope {
    request_id: String,
    timer: Timer,
    closed: Cell<bool>,
}

impl RequestScope {
    /// Opens a scope with a fresh request id
    pub fn begin() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Opens a scope with a caller-chosen request id
    pub fn with_id(request_id: impl Into<String>) -> Self {
        let request_id = request_id.into();
        Event::RequestReceived.log(&[("request_id", &request_id)]);

        Self {
            request_id,
            timer: Timer::new(),
            closed: Cell::new(false),
        }
    }

    /// Request id carried in every line of this scope
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Closes the scope successfully
    pub fn complete(self, extra_fields: &[(&str, &str)]) {
        self.closed.set(true);
        let elapsed = self.timer.elapsed_ms();

        let mut fields: Vec<(&str, &str)> = vec![
            ("elapsed_ms", elapsed.as_str()),
            ("request_id", self.request_id.as_str()),
        ];
        fields.extend(extra_fields.iter().copied());

        Event::RequestCompleted.log(&fields);
    }

    /// Closes the scope as rejected
    pub fn reject(self, code: &str, reason: &str) {
        self.closed.set(true);
        Event::RequestRejected.log(&[
            ("code", code),
            ("reason", reason),
            ("request_id", &self.request_id),
        ]);
    }

    /// Check if the scope has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        if !self.closed.get() {
            Logger::warn(
                "REQUEST_INCOMPLETE",
                &[
                    ("reason", "scope dropped without response"),
                    ("request_id", &self.request_id),
                ],
            );
        }
    }
}

/// A simple duration timer for logging elapsed time
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
