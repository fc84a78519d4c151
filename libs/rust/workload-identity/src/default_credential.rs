//! Default credential chain.
//!
//! Builds its members from the ambient environment the same way the Azure
//! SDKs' default credential does for the two sources relevant inside a
//! cluster: a client secret, then workload identity.

use crate::{
    client_assertion::ClientAssertionCredential,
    client_secret::ClientSecretCredential,
    config::{AZURE_CLIENT_SECRET, IdentityConfig},
    credential::{AccessToken, TokenCredential},
    error::{IdentityError, IdentityResult},
};
use async_trait::async_trait;
use rust_common::process_env;
use secrecy::SecretString;
use std::{fmt, sync::Arc};
use tracing::{debug, instrument};

/// Authority host used when `AZURE_AUTHORITY_HOST` is unset.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com/";

/// Ordered chain of credentials; the first one to return a token wins.
pub struct DefaultCredential {
    sources: Vec<(String, Arc<dyn TokenCredential>)>,
}

impl DefaultCredential {
    /// Create a chain from explicit, named members.
    #[must_use]
    pub fn new(sources: Vec<(String, Arc<dyn TokenCredential>)>) -> Self {
        Self { sources }
    }

    /// Build the chain from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_env() -> IdentityResult<Self> {
        Self::from_lookup(&process_env)
    }

    /// Build the chain through `lookup`.
    ///
    /// * `AZURE_CLIENT_SECRET` set: client secret credential.
    /// * `AZURE_FEDERATED_TOKEN_FILE` set: workload identity credential.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_lookup<L>(lookup: &L) -> IdentityResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = IdentityConfig::from_lookup(lookup);
        if config.authority_host.is_empty() {
            config.authority_host = DEFAULT_AUTHORITY_HOST.to_string();
        }

        let mut sources: Vec<(String, Arc<dyn TokenCredential>)> = Vec::new();

        if let Some(secret) = lookup(AZURE_CLIENT_SECRET).filter(|s| !s.is_empty()) {
            let credential: Arc<dyn TokenCredential> = Arc::new(ClientSecretCredential::new(
                &config,
                SecretString::from(secret),
            )?);
            sources.push(("client secret".to_string(), credential));
        }

        if !config.federated_token_file.as_os_str().is_empty() {
            let credential: Arc<dyn TokenCredential> =
                Arc::new(ClientAssertionCredential::new(&config)?);
            sources.push(("workload identity".to_string(), credential));
        }

        debug!(
            members = ?sources.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            "Built default credential chain"
        );
        Ok(Self { sources })
    }

    /// Names of the chain members, in order.
    #[must_use]
    pub fn members(&self) -> Vec<&str> {
        self.sources.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl fmt::Debug for DefaultCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultCredential")
            .field("members", &self.members())
            .finish()
    }
}

#[async_trait]
impl TokenCredential for DefaultCredential {
    #[instrument(skip(self))]
    async fn get_token(&self, scopes: &[&str]) -> IdentityResult<AccessToken> {
        if self.sources.is_empty() {
            return Err(IdentityError::CredentialUnavailable(vec![format!(
                "no credential configured; set {AZURE_CLIENT_SECRET} or AZURE_FEDERATED_TOKEN_FILE"
            )]));
        }

        let mut failures = Vec::with_capacity(self.sources.len());
        for (name, credential) in &self.sources {
            match credential.get_token(scopes).await {
                Ok(token) => {
                    debug!(credential = %name, "Default credential chain succeeded");
                    return Ok(token);
                }
                Err(e) => {
                    debug!(credential = %name, error = %e, "Chain member failed");
                    failures.push(format!("{name}: {e}"));
                }
            }
        }

        Err(IdentityError::CredentialUnavailable(failures))
    }
}
