//! Token credential abstraction.

use crate::error::IdentityResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

/// Bearer token plus its absolute expiry.
///
/// The token is wrapped in [`SecretString`] so `Debug` output never shows it.
#[derive(Debug, Clone)]
pub struct AccessToken {
    token: SecretString,
    /// When the identity provider stops accepting the token
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    /// Create an access token.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            expires_on,
        }
    }

    /// The raw token, for building an `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Anything that can obtain an access token for a set of scopes.
///
/// Object safe, so clients hold an `Arc<dyn TokenCredential>` and call
/// [`TokenCredential::get_token`] whenever they authenticate a request.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Obtain an access token for `scopes`.
    ///
    /// Every call performs a fresh exchange; implementations do not cache.
    async fn get_token(&self, scopes: &[&str]) -> IdentityResult<AccessToken>;
}
