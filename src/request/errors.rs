//! # Request Errors
//!
//! Raised while turning a JSON request into a `ListQuery`. The engine itself
//! never fails; everything here is a caller mistake.

use serde::Serialize;
use thiserror::Error;

/// Result type for request operations
pub type RequestResult<T> = Result<T, RequestError>;

/// Request errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Request line is not a valid request object
    #[error("Malformed request: {0}")]
    Malformed(String),

    /// Page number below 1
    #[error("Invalid page {0}: pages start at 1")]
    InvalidPage(usize),

    /// Page size zero or above the configured maximum
    #[error("Invalid page_size {size}: must be between 1 and {max}")]
    InvalidPageSize { size: usize, max: usize },

    /// Date bound that cannot be parsed
    #[error("Invalid {bound} date: {value}")]
    InvalidDate { bound: &'static str, value: String },

    /// Record that does not decode into the collection's record type
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

impl RequestError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::Malformed(_) => "PINOS_MALFORMED_REQUEST",
            RequestError::InvalidPage(_) => "PINOS_INVALID_PAGE",
            RequestError::InvalidPageSize { .. } => "PINOS_INVALID_PAGE_SIZE",
            RequestError::InvalidDate { .. } => "PINOS_INVALID_DATE",
            RequestError::InvalidRecord { .. } => "PINOS_INVALID_RECORD",
        }
    }

    /// Error body for responses
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            status: "error",
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(e: serde_json::Error) -> Self {
        RequestError::Malformed(e.to_string())
    }
}

/// Error response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
}
