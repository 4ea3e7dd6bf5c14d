//! Command-line interface definition for lictrack
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for checking authentication, fetching license data,
//! and verifying Secret Server access.

use clap::{Parser, Subcommand};

/// lictrack - License tracker client
///
/// Talks to the license server with bearer-token authentication and prints
/// license data on the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "lictrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for lictrack
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Authenticate against the license server and report session state
    Status,

    /// Fetch the license document and print it
    Licenses,

    /// Verify Secret Server access and print redacted service credentials
    Secrets,
}
