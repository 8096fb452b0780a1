//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed event names
//! - Request scopes with elapsed time
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on query results
//! 2. Synchronous, no background threads
//! 3. Deterministic field order
//!
//! # Usage
//!
//! ```ignore
//! use lospinos::observability::{Event, Logger, RequestScope, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! Event::ConfigLoaded.log(&[("path", "lospinos.json")]);
//!
//! let scope = RequestScope::begin();
//! // ... handle request ...
//! scope.complete(&[("matching", "42")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{RequestScope, Timer};
