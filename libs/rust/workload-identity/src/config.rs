//! Workload identity configuration.
//!
//! The workload identity webhook injects these variables (and the projected
//! token volume) into every pod whose service account is annotated for
//! federation. Unset variables become empty strings; nothing here is
//! validated, a bad value surfaces when the token exchange is attempted.

use rust_common::{process_env, var_or_empty};
use std::path::PathBuf;

/// Client (application) ID of the federated identity.
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
/// Tenant the identity lives in.
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
/// Identity provider host, including its trailing slash.
pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
/// Path of the projected service account token.
pub const AZURE_FEDERATED_TOKEN_FILE: &str = "AZURE_FEDERATED_TOKEN_FILE";
/// Client secret, only read by the default credential chain.
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";

/// Identity federation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Application (client) ID
    pub client_id: String,
    /// Directory (tenant) ID
    pub tenant_id: String,
    /// Authority host, e.g. `https://login.microsoftonline.com/`
    pub authority_host: String,
    /// Federated token file
    pub federated_token_file: PathBuf,
}

impl IdentityConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        tenant_id: impl Into<String>,
        authority_host: impl Into<String>,
        federated_token_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            tenant_id: tenant_id.into(),
            authority_host: authority_host.into(),
            federated_token_file: federated_token_file.into(),
        }
    }

    /// Load from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    /// Load through `lookup`, defaulting every unset variable to empty.
    pub fn from_lookup<L>(lookup: &L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        Self {
            client_id: var_or_empty(lookup, AZURE_CLIENT_ID),
            tenant_id: var_or_empty(lookup, AZURE_TENANT_ID),
            authority_host: var_or_empty(lookup, AZURE_AUTHORITY_HOST),
            federated_token_file: PathBuf::from(var_or_empty(lookup, AZURE_FEDERATED_TOKEN_FILE)),
        }
    }

    /// Authority URL: the authority host immediately followed by the tenant ID.
    ///
    /// No slash is inserted or removed; the webhook always injects a host
    /// ending in `/`.
    #[must_use]
    pub fn authority(&self) -> String {
        format!("{}{}", self.authority_host, self.tenant_id)
    }

    /// OAuth2 v2 token endpoint under [`Self::authority`].
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/v2.0/token", self.authority())
    }
}
