//! Key Vault sample - entry point.

use anyhow::Context;
use keyvault_sample::{SampleConfig, build_credential, run};
use rust_common::{TracingConfig, init_tracing, process_env};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = SampleConfig::from_env().context("failed to load configuration")?;

    init_tracing(&TracingConfig::default().with_format(&config.log_format));

    info!(
        vault = %config.vault_url,
        secret_name = %config.secret_name,
        credential = config.credential.as_str(),
        "Starting Key Vault sample"
    );

    let credential = build_credential(&config, &process_env)?;
    if let Err(e) = run(&config, credential, &mut std::io::stdout()).await {
        error!(
            error = %e,
            vault = %config.vault_url,
            secret_name = %config.secret_name,
            "failed to get secret from keyvault"
        );
        return Err(e.into());
    }

    Ok(())
}
