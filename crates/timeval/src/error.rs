//! Error types for timestamp conversion.

use thiserror::Error;

/// Errors that can occur while converting between milliseconds and
/// timestamps.
#[derive(Error, Debug)]
pub enum TimevalError {
    /// The input is not a usable number.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the input.
        reason: &'static str,
    },

    /// The millisecond value does not fit in a 64-bit microsecond count.
    #[error("millisecond value out of representable bounds: {millis}")]
    OutOfRange {
        /// The rejected input.
        millis: f64,
    },

    /// The converter configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl TimevalError {
    /// Create an invalid-argument error.
    pub const fn invalid_argument(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, TimevalError>;
