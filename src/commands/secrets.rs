//! Secret Server verification command

use crate::config::Config;
use crate::error::Result;
use crate::secrets::SecretClient;

/// Resolve the service credentials and print them with the secret redacted
pub async fn run_secrets(config: Config) -> Result<()> {
    let client = SecretClient::from_config(&config.secrets)?;

    tracing::info!("Verifying Secret Server connectivity");
    let credentials = client.service_credentials().await?;

    println!("Client ID: {}", credentials.client_id);
    println!("Tenant ID: {}", credentials.tenant_id);
    println!("Client Secret: [REDACTED]");
    println!("Allowed Group ID: {}", credentials.allowed_group_id);
    Ok(())
}
