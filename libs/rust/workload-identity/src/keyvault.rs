//! Azure Key Vault secrets client.
//!
//! Authenticates every request by asking its credential for a fresh token.

use crate::{
    credential::TokenCredential,
    error::{IdentityError, IdentityResult},
    secrets::{KeyVaultErrorResponse, KeyVaultSecret, SecretBundle},
};
use reqwest::{Client, StatusCode};
use rust_common::{HttpConfig, build_http_client};
use std::{fmt, sync::Arc};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Scope requested for Key Vault data-plane access.
pub const KEYVAULT_SCOPE: &str = "https://vault.azure.net/.default";

/// Key Vault REST API version.
pub const API_VERSION: &str = "7.4";

/// Public-cloud vault URL for a vault name.
#[must_use]
pub fn vault_url_from_name(name: &str) -> String {
    format!("https://{name}.vault.azure.net")
}

/// Key Vault secrets client.
pub struct SecretClient {
    vault_url: Url,
    credential: Arc<dyn TokenCredential>,
    http: Client,
}

impl SecretClient {
    /// Create a client for `vault_url` authenticating with `credential`.
    ///
    /// # Errors
    ///
    /// Returns an error if `vault_url` is not an absolute http(s) URL, or the
    /// HTTP client cannot be built.
    pub fn new(vault_url: &str, credential: Arc<dyn TokenCredential>) -> IdentityResult<Self> {
        let invalid = |reason: String| IdentityError::InvalidVaultUrl {
            url: vault_url.to_string(),
            reason,
        };

        let parsed = Url::parse(vault_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(invalid("expected an http(s) URL".to_string()));
        }

        Ok(Self {
            vault_url: parsed,
            credential,
            http: build_http_client(&HttpConfig::default())?,
        })
    }

    /// Replace the HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// The vault this client talks to.
    #[must_use]
    pub fn vault_url(&self) -> &str {
        self.vault_url.as_str()
    }

    /// Get the latest version of secret `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token can be obtained or Key Vault rejects the
    /// request.
    pub async fn get_secret(&self, name: &str) -> IdentityResult<KeyVaultSecret> {
        self.get_secret_version(name, "").await
    }

    /// Get a specific version of secret `name`; an empty version means latest.
    ///
    /// # Errors
    ///
    /// Returns an error if no token can be obtained or Key Vault rejects the
    /// request.
    #[instrument(skip(self), fields(vault = %self.vault_url))]
    pub async fn get_secret_version(
        &self,
        name: &str,
        version: &str,
    ) -> IdentityResult<KeyVaultSecret> {
        let url = self.secret_url(name, version)?;
        let token = self.credential.get_token(&[KEYVAULT_SCOPE]).await?;

        debug!(%url, "Getting secret");
        let response = self
            .http
            .get(url)
            .bearer_auth(token.secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Key Vault request failed");
            return Err(map_error(status, name, &body));
        }

        let bundle: SecretBundle = response.json().await?;
        info!(secret_name = name, "Fetched secret");
        Ok(bundle.into())
    }

    fn secret_url(&self, name: &str, version: &str) -> IdentityResult<Url> {
        let mut url = self.vault_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| IdentityError::InvalidVaultUrl {
                    url: self.vault_url.to_string(),
                    reason: "cannot be a base".to_string(),
                })?;
            segments.pop_if_empty().push("secrets").push(name);
            if !version.is_empty() {
                segments.push(version);
            }
        }
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }
}

impl fmt::Debug for SecretClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretClient")
            .field("vault_url", &self.vault_url.as_str())
            .finish_non_exhaustive()
    }
}

fn map_error(status: StatusCode, name: &str, body: &str) -> IdentityError {
    let parsed = serde_json::from_str::<KeyVaultErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .map_or_else(|| body.to_string(), |r| r.error.message.clone());

    match status {
        StatusCode::UNAUTHORIZED => IdentityError::auth_failed(message),
        StatusCode::FORBIDDEN => IdentityError::PermissionDenied(format!("{name}: {message}")),
        StatusCode::NOT_FOUND => IdentityError::not_found(name),
        _ => IdentityError::KeyVault {
            status: status.as_u16(),
            code: parsed.map_or_else(|| "Unknown".to_string(), |r| r.error.code),
            message,
        },
    }
}
