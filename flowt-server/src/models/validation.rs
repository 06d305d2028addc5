//! Validation error types

use std::fmt;

/// Validation error for request models
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric value outside the accepted range
    OutOfRange { field: &'static str, min: i64, max: i64 },

    /// Input could not be decoded into the expected shape
    Malformed { source: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::Malformed { source, reason } => write!(f, "invalid {}: {}", source, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
