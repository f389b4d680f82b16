//! Validation error types

use std::fmt;

/// Request body could not be turned into a domain model.
///
/// Raised before any database work happens.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Body is not valid JSON
    Syntax { reason: String },

    /// JSON is well-formed but a field is missing or has the wrong type
    Data { reason: String },

    /// `Content-Type: application/json` header missing
    ContentType,

    /// Body could not be read
    Body { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { reason } => write!(f, "malformed JSON: {}", reason),
            Self::Data { reason } => write!(f, "invalid field: {}", reason),
            Self::ContentType => write!(f, "expected Content-Type: application/json"),
            Self::Body { reason } => write!(f, "unreadable body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
