//! Secret Server client
//!
//! Retrieves service credentials from a Thycotic-style Secret Server using
//! its Windows-authentication web service endpoint. The server answers with
//! a single secret record whose `items` array holds slug/value pairs.

use crate::config::SecretsConfig;
use crate::error::{LictrackError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Credential set resolved from the Secret Server record
#[derive(Debug, Clone)]
pub struct ServiceCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub allowed_group_id: String,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    #[serde(default)]
    items: Vec<SecretItem>,
}

#[derive(Debug, Deserialize)]
struct SecretItem {
    slug: String,
    #[serde(rename = "itemValue")]
    item_value: Option<String>,
}

/// Client for a single secret record on a Secret Server instance
pub struct SecretClient {
    http: Client,
    server_url: String,
    secret_id: u32,
}

impl SecretClient {
    /// Create a client for one secret record
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(server_url: &str, secret_id: u32) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("lictrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                LictrackError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
            secret_id,
        })
    }

    /// Build a client from the `secrets` config section
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `server_url` or `secret_id` is
    /// missing.
    pub fn from_config(config: &SecretsConfig) -> Result<Self> {
        let server_url = config.server_url.as_deref().ok_or_else(|| {
            LictrackError::Config(
                "secrets.server_url is not configured (set SECRET_SERVER_URL)".to_string(),
            )
        })?;
        let secret_id = config.secret_id.ok_or_else(|| {
            LictrackError::Config(
                "secrets.secret_id is not configured (set SECRET_SERVER_ID)".to_string(),
            )
        })?;
        Self::new(server_url, secret_id)
    }

    /// Retrieve one field of the secret record by slug
    ///
    /// # Errors
    ///
    /// Returns [`LictrackError::Secret`] when the server answers with a
    /// non-success status, the body does not parse, or the slug is absent.
    pub async fn fetch_secret(&self, slug: &str) -> Result<String> {
        let url = format!(
            "{}/winauthwebservices/api/v1/secrets/{}",
            self.server_url, self.secret_id
        );

        tracing::debug!("Retrieving secret field {} from {}", slug, url);

        let response = self
            .http
            .get(&url)
            // Windows Authentication: the gateway authenticates the caller,
            // the basic-auth header itself carries empty credentials
            .basic_auth("", Some(""))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LictrackError::Secret(format!(
                "Secret Server returned {} for secret {}",
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string()),
                self.secret_id
            )));
        }

        let payload: SecretPayload = response.json().await.map_err(|e| {
            LictrackError::Secret(format!("failed to parse Secret Server response: {}", e))
        })?;

        payload
            .items
            .into_iter()
            .find(|item| item.slug == slug)
            .and_then(|item| item.item_value)
            .ok_or_else(|| {
                LictrackError::Secret(format!(
                    "secret {} not found in Secret Server response",
                    slug
                ))
            })
    }

    /// Resolve the full service credential set
    pub async fn service_credentials(&self) -> Result<ServiceCredentials> {
        Ok(ServiceCredentials {
            client_id: self.fetch_secret("clientId").await?,
            client_secret: self.fetch_secret("clientSecret").await?,
            tenant_id: self.fetch_secret("tenantId").await?,
            allowed_group_id: self.fetch_secret("allowedGroupId").await?,
        })
    }
}
