//! Configuration for the Key Vault sample.
//!
//! Everything is read from environment variables once at startup. The vault
//! endpoint and secret name are checked before anything touches the network.

use crate::error::{SampleError, SampleResult};
use auth_workload_identity::{IdentityConfig, vault_url_from_name};
use rust_common::{PlatformError, parse_env, process_env, require_non_empty, var_or_empty};
use std::time::Duration;

/// Full vault URL, e.g. `https://myvault.vault.azure.net`.
pub const KEYVAULT_URL: &str = "KEYVAULT_URL";
/// Vault name, used when `KEYVAULT_URL` is unset.
pub const KEYVAULT_NAME: &str = "KEYVAULT_NAME";
/// Secret to fetch.
pub const SECRET_NAME: &str = "SECRET_NAME";
/// Secret version; unset means latest.
pub const SECRET_VERSION: &str = "SECRET_VERSION";
/// `assertion` (default) or `default`.
pub const SAMPLE_CREDENTIAL: &str = "SAMPLE_CREDENTIAL";
/// Seconds between fetches; unset or 0 fetches once.
pub const POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
/// `text` (default) or `json`.
pub const LOG_FORMAT: &str = "LOG_FORMAT";

/// Which credential authenticates the secret client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialKind {
    /// Client assertion read from the federated token file
    #[default]
    Assertion,
    /// Default chain built from ambient environment variables
    Default,
}

impl CredentialKind {
    /// Parse from string; empty means [`CredentialKind::Assertion`].
    ///
    /// # Errors
    ///
    /// Returns an error for any other value.
    pub fn parse(s: &str) -> SampleResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "assertion" => Ok(Self::Assertion),
            "default" => Ok(Self::Default),
            other => Err(SampleError::config(format!(
                "Invalid {SAMPLE_CREDENTIAL}: {other} (expected assertion or default)"
            ))),
        }
    }

    /// Name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assertion => "assertion",
            Self::Default => "default",
        }
    }
}

/// Sample configuration.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Vault endpoint
    pub vault_url: String,
    /// Secret to fetch
    pub secret_name: String,
    /// Secret version, empty for latest
    pub secret_version: String,
    /// Credential used to authenticate
    pub credential: CredentialKind,
    /// Delay between fetches when polling
    pub poll_interval: Option<Duration>,
    /// Log output format
    pub log_format: String,
    /// Workload identity settings
    pub identity: IdentityConfig,
}

impl SampleConfig {
    /// Load configuration from environment variables, after loading a
    /// `.env` file if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault endpoint or secret name is missing, or
    /// a variable is malformed.
    pub fn from_env() -> SampleResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&process_env)
    }

    /// Load configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault endpoint or secret name is missing, or
    /// a variable is malformed.
    pub fn from_lookup<L>(lookup: &L) -> SampleResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let vault_url = resolve_vault_url(lookup)?;
        let secret_name =
            require_non_empty(SECRET_NAME, &var_or_empty(lookup, SECRET_NAME))?.to_string();
        let secret_version = var_or_empty(lookup, SECRET_VERSION).trim().to_string();
        let credential = CredentialKind::parse(&var_or_empty(lookup, SAMPLE_CREDENTIAL))?;

        let poll_secs: u64 = parse_env(lookup, POLL_INTERVAL_SECS, 0)?;
        let poll_interval = (poll_secs > 0).then(|| Duration::from_secs(poll_secs));

        Ok(Self {
            vault_url,
            secret_name,
            secret_version,
            credential,
            poll_interval,
            log_format: var_or_empty(lookup, LOG_FORMAT),
            identity: IdentityConfig::from_lookup(lookup),
        })
    }
}

/// `KEYVAULT_URL` if set, otherwise the URL derived from `KEYVAULT_NAME`.
fn resolve_vault_url<L>(lookup: &L) -> Result<String, PlatformError>
where
    L: Fn(&str) -> Option<String>,
{
    let url = var_or_empty(lookup, KEYVAULT_URL);
    if !url.trim().is_empty() {
        return Ok(url.trim().to_string());
    }

    let name = var_or_empty(lookup, KEYVAULT_NAME);
    if !name.trim().is_empty() {
        return Ok(vault_url_from_name(name.trim()));
    }

    Err(PlatformError::missing_env(format!(
        "{KEYVAULT_URL} or {KEYVAULT_NAME}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credential_kind_parsing() {
        assert_eq!(CredentialKind::parse("").unwrap(), CredentialKind::Assertion);
        assert_eq!(CredentialKind::parse("Assertion").unwrap(), CredentialKind::Assertion);
        assert_eq!(CredentialKind::parse("DEFAULT").unwrap(), CredentialKind::Default);
        assert!(CredentialKind::parse("managed-identity").is_err());
    }

    #[test]
    fn test_credential_kind_as_str() {
        assert_eq!(CredentialKind::Assertion.as_str(), "assertion");
        assert_eq!(CredentialKind::Default.as_str(), "default");
    }

    #[test]
    fn test_vault_url_preferred_over_name() {
        let config = SampleConfig::from_lookup(&lookup_from(&[
            (KEYVAULT_URL, "https://x.vault.azure.net"),
            (KEYVAULT_NAME, "ignored"),
            (SECRET_NAME, "foo"),
        ]))
        .unwrap();
        assert_eq!(config.vault_url, "https://x.vault.azure.net");
    }

    #[test]
    fn test_vault_url_derived_from_name() {
        let config = SampleConfig::from_lookup(&lookup_from(&[
            (KEYVAULT_NAME, "myvault"),
            (SECRET_NAME, "foo"),
        ]))
        .unwrap();
        assert_eq!(config.vault_url, "https://myvault.vault.azure.net");
    }

    #[test]
    fn test_missing_secret_name() {
        let err = SampleConfig::from_lookup(&lookup_from(&[(KEYVAULT_URL, "https://x.vault.azure.net")]))
            .unwrap_err();
        match err {
            SampleError::Config(e) => assert_eq!(e.missing_variable(), Some(SECRET_NAME)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_vault() {
        let err = SampleConfig::from_lookup(&lookup_from(&[(SECRET_NAME, "foo")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "KEYVAULT_URL or KEYVAULT_NAME environment variable not set"
        );
    }

    #[test]
    fn test_defaults() {
        let config = SampleConfig::from_lookup(&lookup_from(&[
            (KEYVAULT_URL, "https://x.vault.azure.net"),
            (SECRET_NAME, "foo"),
        ]))
        .unwrap();
        assert_eq!(config.secret_version, "");
        assert_eq!(config.credential, CredentialKind::Assertion);
        assert_eq!(config.poll_interval, None);
        assert_eq!(config.identity, IdentityConfig::default());
    }

    #[test]
    fn test_poll_interval() {
        let config = SampleConfig::from_lookup(&lookup_from(&[
            (KEYVAULT_URL, "https://x.vault.azure.net"),
            (SECRET_NAME, "foo"),
            (POLL_INTERVAL_SECS, "60"),
        ]))
        .unwrap();
        assert_eq!(config.poll_interval, Some(Duration::from_secs(60)));

        let err = SampleConfig::from_lookup(&lookup_from(&[
            (KEYVAULT_URL, "https://x.vault.azure.net"),
            (SECRET_NAME, "foo"),
            (POLL_INTERVAL_SECS, "every minute"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(POLL_INTERVAL_SECS));
    }
}
