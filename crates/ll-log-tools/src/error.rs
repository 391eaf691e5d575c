//! Log tool error types.

use thiserror::Error;

/// Errors that can occur while configuring log tools.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("invalid regex pattern: {0}")]
    Regex(String),

    #[error("invalid excerpt limits: {0}")]
    Limits(String),
}

/// Convenience alias for log tool results.
pub type LogResult<T> = Result<T, LogError>;
