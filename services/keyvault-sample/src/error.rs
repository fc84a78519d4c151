//! Sample error type.

use auth_workload_identity::IdentityError;
use rust_common::PlatformError;
use thiserror::Error;

/// Errors that end a sample run.
#[derive(Error, Debug)]
pub enum SampleError {
    /// Missing or malformed environment
    #[error(transparent)]
    Config(#[from] PlatformError),

    /// Token exchange or secret fetch failed
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Writing the result to stdout failed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl SampleError {
    /// Create a configuration error with the given message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(PlatformError::invalid_input(msg))
    }
}

/// Result type for the sample.
pub type SampleResult<T> = Result<T, SampleError>;
