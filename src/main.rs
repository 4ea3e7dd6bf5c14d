//! lictrack - License tracker client CLI
//!
#![doc = "lictrack - License tracker client CLI"]
#![doc = "Main entry point for the lictrack application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lictrack::cli::{Cli, Commands};
use lictrack::commands;
use lictrack::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Status => {
            tracing::info!("Checking authentication status");
            commands::status::run_status(config).await?;
            Ok(())
        }
        Commands::Licenses => {
            tracing::info!("Fetching license data");
            commands::licenses::run_licenses(config).await?;
            Ok(())
        }
        Commands::Secrets => {
            tracing::info!("Verifying Secret Server access");
            commands::secrets::run_secrets(config).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lictrack=debug"
    } else {
        "lictrack=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
