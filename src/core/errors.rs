/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fill-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum FillError {
    #[error("Buffer already filled: no remaining capacity")]
    #[diagnostic(
        code(fill::already_filled),
        help("Each ParallelFiller runs exactly one fill. Construct a new instance for another run.")
    )]
    AlreadyFilled,

    #[error("Readout before fill completed")]
    #[diagnostic(
        code(fill::not_filled),
        help("Call fill() and let it return before reading the buffer back.")
    )]
    NotFilled,

    #[error("Unsupported scheduling policy: {0}")]
    #[diagnostic(
        code(fill::unsupported_policy),
        help("Use one of: static, static-chunk, dynamic, dynamic-chunk, guided, guided-chunk, runtime, auto.")
    )]
    UnsupportedPolicy(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(fill::invalid_config),
        help("Worker, iteration, and chunk counts must be positive; at most 26 workers (one letter each).")
    )]
    InvalidConfig(String),
}

/// Result type for fill operations
///
/// # Must Use
/// Fill operations can fail and must be handled to prevent reading stale state
pub type Result<T> = std::result::Result<T, FillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_error_serialization() {
        let error = FillError::UnsupportedPolicy("lifo".into());
        let json = serde_json::to_string(&error).unwrap();
        let deserialized: FillError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, deserialized);
    }

    #[test]
    fn test_fill_error_display() {
        let error = FillError::AlreadyFilled;
        assert_eq!(
            error.to_string(),
            "Buffer already filled: no remaining capacity"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let error = FillError::InvalidConfig("workers must be > 0".into());
        assert!(error.to_string().contains("workers must be > 0"));
    }
}
