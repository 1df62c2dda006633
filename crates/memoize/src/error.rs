//! Error types for the memoizer's ambient surface
//!
//! Memoizing a function never fails: size hints are normalised and a missing
//! reconciler falls back to the positional default. The only fallible
//! operations are the configuration loaders, which report through
//! [`MemoizeError`].
//!
//! Failures of the wrapped function are not represented here. A panic
//! unwinds through the wrapper untouched and an `Err` returned to a
//! [`FallibleMemoized`](crate::memo::FallibleMemoized) is handed back to
//! the caller as-is.

use thiserror::Error;

/// Memoizer error type
#[derive(Debug, Error)]
pub enum MemoizeError {
    /// Configuration could not be parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Parser message
        message: String,
    },

    /// Configuration file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Memoizer result type
pub type MemoizeResult<T> = Result<T, MemoizeError>;

impl MemoizeError {
    /// Build a configuration error from any displayable message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

#[cfg(feature = "config")]
impl From<toml::de::Error> for MemoizeError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error.
    use super::*;

    /// Validates `MemoizeError::config` display formatting.
    #[test]
    fn test_config_error_display() {
        let err = MemoizeError::config("expected a table");
        assert_eq!(err.to_string(), "Configuration error: expected a table");
    }

    /// Validates that IO errors convert transparently.
    #[test]
    fn test_io_error_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "memo.toml missing");
        let err: MemoizeError = io.into();
        assert!(matches!(err, MemoizeError::Io(_)));
        assert_eq!(err.to_string(), "memo.toml missing");
    }
}
