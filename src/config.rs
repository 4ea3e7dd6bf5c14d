//! Configuration management for lictrack
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file with environment variable overrides.
//! A missing config file falls back to built-in defaults so the CLI works
//! against a local server out of the box.

use crate::error::{LictrackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for lictrack
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// License server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication behavior settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Secret Server settings (optional)
    #[serde(default)]
    pub secrets: SecretsConfig,
}

/// License server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the license server
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Authentication behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Maximum number of 401 recovery cycles before the session is
    /// forcibly de-authenticated
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Timeout for each HTTP request (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout() -> u64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Secret Server configuration
///
/// Both fields must be present for the `secrets` command to work; they are
/// optional because the auth client itself does not need them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    /// Base URL of the Secret Server instance
    #[serde(default)]
    pub server_url: Option<String>,

    /// Numeric ID of the secret holding the service credentials
    #[serde(default)]
    pub secret_id: Option<u32>,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    ///
    /// A missing file is not an error: defaults are used instead. The
    /// recognized environment variables are `LICTRACK_SERVER_URL`,
    /// `SECRET_SERVER_URL` and `SECRET_SERVER_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", path);
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("LICTRACK_SERVER_URL") {
            if !url.is_empty() {
                self.server.base_url = url;
            }
        }
        if let Ok(url) = std::env::var("SECRET_SERVER_URL") {
            if !url.is_empty() {
                self.secrets.server_url = Some(url);
            }
        }
        if let Ok(id) = std::env::var("SECRET_SERVER_ID") {
            match id.parse() {
                Ok(value) => self.secrets.secret_id = Some(value),
                Err(_) => tracing::warn!("Ignoring non-numeric SECRET_SERVER_ID: {}", id),
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a URL does not parse or the retry budget is zero.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.server.base_url).map_err(|e| {
            LictrackError::Config(format!(
                "invalid server base URL {}: {}",
                self.server.base_url, e
            ))
        })?;

        if self.auth.max_retries == 0 {
            return Err(LictrackError::Config(
                "auth.max_retries must be at least 1".to_string(),
            ));
        }

        if let Some(url) = &self.secrets.server_url {
            Url::parse(url).map_err(|e| {
                LictrackError::Config(format!("invalid Secret Server URL {}: {}", url, e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        std::env::remove_var("LICTRACK_SERVER_URL");
        std::env::remove_var("SECRET_SERVER_URL");
        std::env::remove_var("SECRET_SERVER_ID");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::load("does-not-exist.yaml").unwrap();
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.auth.max_retries, 3);
        assert_eq!(config.auth.timeout_seconds, 30);
        assert!(config.secrets.server_url.is_none());
        assert!(config.secrets.secret_id.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "server:\n  base_url: http://billing.internal:8080\nauth:\n  max_retries: 5"
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.base_url, "http://billing.internal:8080");
        assert_eq!(config.auth.max_retries, 5);
        // Unspecified fields keep their defaults
        assert_eq!(config.auth.timeout_seconds, 30);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("LICTRACK_SERVER_URL", "http://override:9000");
        std::env::set_var("SECRET_SERVER_URL", "https://creds.example.com/SecretServer");
        std::env::set_var("SECRET_SERVER_ID", "42813");

        let config = Config::load("does-not-exist.yaml").unwrap();
        assert_eq!(config.server.base_url, "http://override:9000");
        assert_eq!(
            config.secrets.server_url.as_deref(),
            Some("https://creds.example.com/SecretServer")
        );
        assert_eq!(config.secrets.secret_id, Some(42813));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_non_numeric_secret_id_is_ignored() {
        clear_env();
        std::env::set_var("SECRET_SERVER_ID", "not-a-number");
        let config = Config::load("does-not-exist.yaml").unwrap();
        assert!(config.secrets.secret_id.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_base_url() {
        clear_env();
        let mut config = Config::default();
        config.server.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(LictrackError::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn test_validate_rejects_zero_retries() {
        clear_env();
        let mut config = Config::default();
        config.auth.max_retries = 0;
        assert!(matches!(
            config.validate(),
            Err(LictrackError::Config(_))
        ));
    }
}
