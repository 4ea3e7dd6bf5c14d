//! Authentication status command

use crate::auth::{AuthClient, TracingNotifier};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use std::sync::Arc;

/// Initialize a session against the license server and report the outcome
///
/// # Errors
///
/// Propagates the initialization failure after rendering it, so the process
/// exits non-zero when the server rejects the client.
pub async fn run_status(config: Config) -> Result<()> {
    let client = AuthClient::with_notifier(&config, Arc::new(TracingNotifier))?;

    match client.initialize().await {
        Ok(_) => {
            println!("{}", "Authenticated".green());
            Ok(())
        }
        Err(error) => {
            println!("{}", "Not Authenticated".red());
            if let Some(message) = client.error_message() {
                eprintln!("{}", message.red());
            }
            Err(error)
        }
    }
}
