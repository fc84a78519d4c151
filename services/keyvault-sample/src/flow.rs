//! Secret fetch flow.

use crate::{
    config::{CredentialKind, SampleConfig},
    error::SampleResult,
};
use auth_workload_identity::{
    ClientAssertionCredential, DefaultCredential, KeyVaultSecret, SecretClient, TokenCredential,
};
use std::{io::Write, sync::Arc};
use tracing::{info, instrument};

/// Build the credential selected by `config`.
///
/// The default chain reads its own variables through `lookup`.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built.
pub fn build_credential<L>(
    config: &SampleConfig,
    lookup: &L,
) -> SampleResult<Arc<dyn TokenCredential>>
where
    L: Fn(&str) -> Option<String>,
{
    let credential: Arc<dyn TokenCredential> = match config.credential {
        CredentialKind::Assertion => Arc::new(ClientAssertionCredential::new(&config.identity)?),
        CredentialKind::Default => Arc::new(DefaultCredential::from_lookup(lookup)?),
    };
    Ok(credential)
}

/// Line printed for a fetched secret.
#[must_use]
pub fn render(secret: &KeyVaultSecret) -> String {
    format!("successfully got secret, secret={}", secret.value())
}

/// Fetch the configured secret and write it to `out`.
///
/// Fetches once, or forever with `config.poll_interval` between fetches.
/// Every fetch requests a new token. The first error ends the run.
///
/// # Errors
///
/// Returns an error if the vault URL is invalid, a fetch fails or `out`
/// cannot be written.
#[instrument(
    skip_all,
    fields(
        vault = %config.vault_url,
        secret_name = %config.secret_name,
        credential = config.credential.as_str()
    )
)]
pub async fn run<W: Write>(
    config: &SampleConfig,
    credential: Arc<dyn TokenCredential>,
    out: &mut W,
) -> SampleResult<()> {
    let client = SecretClient::new(&config.vault_url, credential)?;

    loop {
        let secret = client
            .get_secret_version(&config.secret_name, &config.secret_version)
            .await?;
        writeln!(out, "{}", render(&secret))?;
        out.flush()?;

        let Some(interval) = config.poll_interval else {
            return Ok(());
        };
        info!(interval_secs = interval.as_secs(), "Waiting before next fetch");
        tokio::time::sleep(interval).await;
    }
}
