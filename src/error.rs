//! # Error Types
//!
//! Purpose: Separate "could not connect", "connection went away", and "the
//! command itself failed" so callers can react to each.

use thiserror::Error;

/// Result type for the facade.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors surfaced by [`RedisTool`](crate::RedisTool).
#[derive(Debug, Error)]
pub enum ToolError {
    /// Connection setup gave up after the configured number of attempts.
    #[error("unable to connect to redis after {attempts} attempts: {source}")]
    Connect {
        /// Total attempts made, including the first one.
        attempts: u32,
        /// The error from the last attempt.
        #[source]
        source: redis::RedisError,
    },

    /// The liveness check failed; the command was never sent.
    #[error("redis connection is not alive")]
    NotConnected,

    /// The delegated command failed.
    #[error("redis command failed: {0}")]
    Command(#[from] redis::RedisError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_reports_attempts() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ToolError::Connect {
            attempts: 4,
            source: io.into(),
        };
        assert!(err.to_string().contains("after 4 attempts"));
    }

    #[test]
    fn test_not_connected_display() {
        assert_eq!(
            ToolError::NotConnected.to_string(),
            "redis connection is not alive"
        );
    }
}
