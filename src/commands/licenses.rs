//! License data command

use crate::auth::{AuthClient, TracingNotifier};
use crate::config::Config;
use crate::error::Result;
use crate::licenses::LicenseService;
use std::sync::Arc;

/// Fetch the license document and print it as pretty JSON
pub async fn run_licenses(config: Config) -> Result<()> {
    let client = AuthClient::with_notifier(&config, Arc::new(TracingNotifier))?;

    // Authenticate up front so an unreachable server fails before the
    // license request is attempted.
    client.initialize().await?;

    let service = LicenseService::new(client);
    let document = service.fetch().await?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
