//! Identity and Key Vault error types using thiserror 2.0.
//!
//! Each boundary (federated token read, token exchange, secret fetch) maps
//! its failures onto one variant; nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by credentials and the secret client.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Federated token file missing or unreadable
    #[error("failed to read federated token file {}: {source}", .path.display())]
    FederatedTokenRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Identity provider returned an error payload
    ///
    /// Displays exactly the provider's description.
    #[error("{description}")]
    TokenExchange {
        /// OAuth2 error code, e.g. `invalid_client`
        error: String,
        /// Provider's `error_description`
        description: String,
    },

    /// Identity provider answered with an unexpected status and no error payload
    #[error("unexpected status {status} from token endpoint: {body}")]
    Unexpected {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// No credential in a chain could produce a token
    #[error("no credential could provide a token: {}", .0.join("; "))]
    CredentialUnavailable(Vec<String>),

    /// Key Vault rejected the bearer token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Caller lacks permission to read the secret
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Secret not found
    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    /// Any other Key Vault error response
    #[error("Key Vault error {status} ({code}): {message}")]
    KeyVault {
        /// HTTP status code
        status: u16,
        /// Key Vault error code
        code: String,
        /// Key Vault error message
        message: String,
    },

    /// Vault URL is not an absolute URL
    #[error("invalid vault URL {url:?}: {reason}")]
    InvalidVaultUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for identity and Key Vault operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

impl IdentityError {
    /// Create a token exchange error from an OAuth2 error payload.
    ///
    /// An empty description falls back to the error code.
    #[must_use]
    pub fn token_exchange(error: impl Into<String>, description: impl Into<String>) -> Self {
        let error = error.into();
        let description = description.into();
        let description = if description.is_empty() {
            error.clone()
        } else {
            description
        };
        Self::TokenExchange { error, description }
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create a secret not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::SecretNotFound(name.into())
    }
}
