//! License data access
//!
//! Thin typed surface over the authenticated client for the license
//! endpoint of the billing server.

use crate::auth::{AuthClient, RequestOptions};
use crate::error::Result;
use serde_json::Value;

/// License endpoint path on the license server
pub const LICENSES_PATH: &str = "/api/licenses";

/// Service for fetching the license document
///
/// # Examples
///
/// ```no_run
/// use lictrack::config::Config;
/// use lictrack::{AuthClient, LicenseService};
///
/// # async fn example() -> lictrack::Result<()> {
/// let client = AuthClient::new(&Config::default())?;
/// let licenses = LicenseService::new(client).fetch().await?;
/// println!("{}", licenses);
/// # Ok(())
/// # }
/// ```
pub struct LicenseService {
    auth: AuthClient,
}

impl LicenseService {
    /// Create a service over an existing authenticated client
    pub fn new(auth: AuthClient) -> Self {
        Self { auth }
    }

    /// Fetch the license document as parsed JSON
    ///
    /// Initializes the session on demand and recovers once from token
    /// expiry; see [`AuthClient::request`] for the failure modes.
    pub async fn fetch(&self) -> Result<Value> {
        tracing::debug!("Fetching license data");
        self.auth.request(LICENSES_PATH, RequestOptions::default()).await
    }
}
