//! Workload identity credentials and Key Vault client.
//!
//! Exchanges a projected Kubernetes service account token for an Azure AD
//! access token (client-credentials grant with a JWT bearer client
//! assertion) and uses it to read secrets from Azure Key Vault.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assertion;
pub mod client_assertion;
pub mod client_secret;
pub mod config;
pub mod credential;
pub mod default_credential;
pub mod error;
mod exchange;
pub mod keyvault;
pub mod secrets;

pub use assertion::{AssertionSource, FileAssertion};
pub use client_assertion::ClientAssertionCredential;
pub use client_secret::ClientSecretCredential;
pub use config::IdentityConfig;
pub use credential::{AccessToken, TokenCredential};
pub use default_credential::DefaultCredential;
pub use error::{IdentityError, IdentityResult};
pub use exchange::JWT_BEARER_ASSERTION_TYPE;
pub use keyvault::{KEYVAULT_SCOPE, SecretClient, vault_url_from_name};
pub use secrets::KeyVaultSecret;
