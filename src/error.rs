//! Error types for lictrack
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling. Request failures are
//! distinguished by kind so callers can tell an expired session apart from
//! a permission problem or an exhausted retry budget.

use thiserror::Error;

/// Main error type for lictrack operations
#[derive(Error, Debug)]
pub enum LictrackError {
    /// Token endpoint returned a non-success response or could not be reached
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A request had no cached token and on-demand initialization failed
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    /// The 401 retry budget is spent; the session has been de-authenticated
    #[error("Maximum authentication retry attempts reached; please re-authenticate")]
    RetryExhausted,

    /// The single retry after re-authentication returned a non-success response
    #[error("Request failed after retry: {0}")]
    RetryFailed(String),

    /// Server answered 403 Forbidden
    #[error("You do not have permission to access this resource. Please contact your administrator.")]
    Permission,

    /// Any other non-success response
    #[error("Request failed: {0}")]
    Request(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret Server lookup errors
    #[error("Secret error: {0}")]
    Secret(String),

    /// Shared session state became unusable (poisoned lock)
    #[error("Session state error: {0}")]
    Session(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lictrack operations
pub type Result<T> = std::result::Result<T, LictrackError>;
