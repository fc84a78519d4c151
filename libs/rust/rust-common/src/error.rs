//! Centralized error types for the shared helpers.
//!
//! Errors raised here describe problems with how a process was configured,
//! before any outbound call is attempted.

use thiserror::Error;

/// Common error type for platform helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A required environment variable is unset or empty
    #[error("{0} environment variable not set")]
    MissingEnv(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PlatformError {
    /// Create a missing environment variable error.
    #[must_use]
    pub fn missing_env(name: impl Into<String>) -> Self {
        Self::MissingEnv(name.into())
    }

    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Name of the variable behind a [`PlatformError::MissingEnv`].
    #[must_use]
    pub fn missing_variable(&self) -> Option<&str> {
        match self {
            Self::MissingEnv(name) => Some(name),
            Self::InvalidInput(_) => None,
        }
    }
}
