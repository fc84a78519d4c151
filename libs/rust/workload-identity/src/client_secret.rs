//! Client secret credential, the first link of the default chain.

use crate::{
    config::IdentityConfig,
    credential::{AccessToken, TokenCredential},
    error::IdentityResult,
    exchange::request_token,
};
use async_trait::async_trait;
use reqwest::Client;
use rust_common::{HttpConfig, build_http_client};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{info, instrument};

/// Credential authenticating with a static client secret.
pub struct ClientSecretCredential {
    client_id: String,
    token_endpoint: String,
    secret: SecretString,
    http: Client,
}

impl ClientSecretCredential {
    /// Create a credential for `config`'s client and authority.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &IdentityConfig, secret: SecretString) -> IdentityResult<Self> {
        Ok(Self {
            client_id: config.client_id.clone(),
            token_endpoint: config.token_endpoint(),
            secret,
            http: build_http_client(&HttpConfig::default())?,
        })
    }
}

impl fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("client_id", &self.client_id)
            .field("token_endpoint", &self.token_endpoint)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    #[instrument(skip(self), fields(client_id = %self.client_id))]
    async fn get_token(&self, scopes: &[&str]) -> IdentityResult<AccessToken> {
        let scope = scopes.join(" ");
        let token = request_token(
            &self.http,
            &self.token_endpoint,
            &[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.secret.expose_secret()),
                ("scope", scope.as_str()),
            ],
        )
        .await?;

        info!(expires_on = %token.expires_on, "Acquired token with client secret");
        Ok(token)
    }
}
