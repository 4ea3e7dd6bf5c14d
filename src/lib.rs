//! lictrack - License tracker client library
//!
//! This library provides a bearer-token session for a license server:
//! lazy token acquisition, deduplicated concurrent initialization, and a
//! single transparent retry on token expiry, plus small services for the
//! license endpoint and the Secret Server credential store.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `auth`: Authenticated request client and the observer hooks
//! - `licenses`: License document access over the authenticated client
//! - `secrets`: Secret Server credential retrieval
//! - `config`: Configuration management and validation
//! - `error`: Error types and result alias
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use lictrack::config::Config;
//! use lictrack::{AuthClient, LicenseService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let client = AuthClient::new(&config)?;
//!     client.initialize().await?;
//!     let licenses = LicenseService::new(client).fetch().await?;
//!     println!("{}", licenses);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod licenses;
pub mod secrets;

// Re-export commonly used types
pub use auth::{AuthClient, AuthNotifier, NoopNotifier, RequestOptions, TracingNotifier};
pub use config::Config;
pub use error::{LictrackError, Result};
pub use licenses::LicenseService;
pub use secrets::{SecretClient, ServiceCredentials};
