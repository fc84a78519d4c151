//! Wire types for the token endpoint and the Key Vault secrets API.

use crate::error::{IdentityError, IdentityResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Body of a token endpoint response.
///
/// Success and error payloads share one shape; callers check `error` first.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<ExpiresIn>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// `expires_in` as sent by the provider: a number, or a number in a string
/// (the v1 endpoint).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExpiresIn {
    Number(f64),
    Text(String),
}

impl ExpiresIn {
    /// Lifetime in whole seconds, truncating any fraction.
    ///
    /// # Errors
    ///
    /// Returns an error if a textual value is not numeric.
    #[allow(clippy::cast_possible_truncation)]
    pub fn seconds(&self) -> IdentityResult<i64> {
        match self {
            Self::Number(n) => Ok(n.trunc() as i64),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(|n| n.trunc() as i64)
                .map_err(|e| {
                    IdentityError::token_exchange(
                        "invalid_response",
                        format!("invalid expires_in {s:?}: {e}"),
                    )
                }),
        }
    }
}

/// Key Vault secret bundle (`GET /secrets/{name}`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretBundle {
    pub value: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub attributes: Option<SecretAttributes>,
}

#[derive(Debug, Deserialize)]
pub struct SecretAttributes {
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Key Vault error envelope.
#[derive(Debug, Deserialize)]
pub struct KeyVaultErrorResponse {
    pub error: KeyVaultErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct KeyVaultErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// A secret fetched from Key Vault.
#[derive(Debug, Clone)]
pub struct KeyVaultSecret {
    /// Secret identifier URL, including version
    pub id: Option<String>,
    /// Content type set on the secret, if any
    pub content_type: Option<String>,
    /// Whether the secret is enabled
    pub enabled: Option<bool>,
    value: SecretString,
}

impl KeyVaultSecret {
    /// The secret value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.expose_secret()
    }
}

impl From<SecretBundle> for KeyVaultSecret {
    fn from(bundle: SecretBundle) -> Self {
        Self {
            id: bundle.id,
            content_type: bundle.content_type,
            enabled: bundle.attributes.and_then(|a| a.enabled),
            value: SecretString::from(bundle.value),
        }
    }
}
