//! Client assertion credential.
//!
//! Exchanges the federated service account token for an access token with
//! the client-credentials grant, presenting the token as a JWT bearer
//! client assertion.

use crate::{
    assertion::{AssertionSource, FileAssertion},
    config::IdentityConfig,
    credential::{AccessToken, TokenCredential},
    error::IdentityResult,
    exchange::{JWT_BEARER_ASSERTION_TYPE, request_token},
};
use async_trait::async_trait;
use reqwest::Client;
use rust_common::{HttpConfig, build_http_client};
use std::{fmt, sync::Arc};
use tracing::{info, instrument};

/// Credential backed by a client assertion.
pub struct ClientAssertionCredential {
    client_id: String,
    authority: String,
    token_endpoint: String,
    source: Arc<dyn AssertionSource>,
    http: Client,
}

impl ClientAssertionCredential {
    /// Create a credential reading the assertion from the configured
    /// federated token file on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &IdentityConfig) -> IdentityResult<Self> {
        Self::with_source(
            config,
            Arc::new(FileAssertion::new(config.federated_token_file.clone())),
        )
    }

    /// Create a credential using an arbitrary assertion source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_source(
        config: &IdentityConfig,
        source: Arc<dyn AssertionSource>,
    ) -> IdentityResult<Self> {
        let http = build_http_client(&HttpConfig::default())?;
        Ok(Self {
            client_id: config.client_id.clone(),
            authority: config.authority(),
            token_endpoint: config.token_endpoint(),
            source,
            http,
        })
    }

    /// Replace the HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Authority the token is requested from.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }
}

impl fmt::Debug for ClientAssertionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientAssertionCredential")
            .field("client_id", &self.client_id)
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenCredential for ClientAssertionCredential {
    #[instrument(skip(self), fields(client_id = %self.client_id, authority = %self.authority))]
    async fn get_token(&self, scopes: &[&str]) -> IdentityResult<AccessToken> {
        let assertion = self.source.assertion().await?;
        let scope = scopes.join(" ");

        let token = request_token(
            &self.http,
            &self.token_endpoint,
            &[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_assertion_type", JWT_BEARER_ASSERTION_TYPE),
                ("client_assertion", assertion.as_str()),
                ("scope", scope.as_str()),
            ],
        )
        .await?;

        info!(expires_on = %token.expires_on, "Acquired token with client assertion");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_from_config() {
        let config = IdentityConfig::new("cid", "tid", "https://login.example.com/", "/tmp/token");
        let credential = ClientAssertionCredential::new(&config).unwrap();
        assert_eq!(credential.authority(), "https://login.example.com/tid");
    }

    #[test]
    fn test_debug_omits_source() {
        let config = IdentityConfig::new("cid", "tid", "https://login.example.com/", "/tmp/token");
        let credential = ClientAssertionCredential::new(&config).unwrap();
        let debug = format!("{credential:?}");
        assert!(debug.contains("cid"));
        assert!(debug.contains("https://login.example.com/tid"));
    }
}
