//! Authenticated request client
//!
//! This module implements the bearer-token session for the license server:
//! a lazily fetched token, deduplicated concurrent initialization, and a
//! single transparent retry when a request comes back 401.
//!
//! Concurrency model: all session state lives behind a `std::sync::Mutex`
//! that is never held across an await point. Concurrent `initialize()`
//! callers join one shared future instead of issuing duplicate token
//! fetches; the shared handle is cleared unconditionally when the attempt
//! settles so a later call can start a fresh one.

use crate::auth::notifier::{AuthNotifier, NoopNotifier};
use crate::config::Config;
use crate::error::{LictrackError, Result};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use url::Url;

/// Token endpoint path on the license server
const TOKEN_PATH: &str = "/api/token";

/// Outcome handle shared between concurrent initialization callers.
///
/// The payload is `Clone` (token or rendered failure message) so every
/// joiner observes the same settled result.
type InitFuture = Shared<BoxFuture<'static, std::result::Result<String, String>>>;

/// Response body of `GET /api/token`
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Per-request configuration merged into the authenticated defaults
///
/// Caller-supplied headers override the generated `Authorization` and
/// `Content-Type` headers.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    /// HTTP method; defaults to GET
    pub method: Option<Method>,

    /// Extra headers, applied after the defaults
    pub headers: Vec<(String, String)>,

    /// Optional JSON body
    pub body: Option<Value>,
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    authenticated: bool,
    last_error: Option<String>,
    retry_count: u32,
    in_flight: Option<InitFuture>,
}

struct ClientInner {
    http: Client,
    base_url: Url,
    max_retries: u32,
    notifier: Arc<dyn AuthNotifier>,
    state: Mutex<SessionState>,
}

/// Client that attaches a bearer token to every request and recovers once
/// from token expiry
///
/// Cloning is cheap; clones share the same session.
///
/// # Examples
///
/// ```no_run
/// use lictrack::config::Config;
/// use lictrack::{AuthClient, RequestOptions};
///
/// # async fn example() -> lictrack::Result<()> {
/// let config = Config::default();
/// let client = AuthClient::new(&config)?;
/// client.initialize().await?;
/// let licenses = client.request("/api/licenses", RequestOptions::default()).await?;
/// println!("{}", licenses);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<ClientInner>,
}

impl AuthClient {
    /// Create a client that discards notifications
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or HTTP client
    /// initialization fails.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_notifier(config, Arc::new(NoopNotifier))
    }

    /// Create a client with an observer for auth-state and error events
    pub fn with_notifier(config: &Config, notifier: Arc<dyn AuthNotifier>) -> Result<Self> {
        let base_url = Url::parse(&config.server.base_url).map_err(|e| {
            LictrackError::Config(format!(
                "invalid server base URL {}: {}",
                config.server.base_url, e
            ))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.auth.timeout_seconds))
            .user_agent(concat!("lictrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                LictrackError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::debug!("Initialized auth client for {}", base_url);

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                max_retries: config.auth.max_retries,
                notifier,
                state: Mutex::new(SessionState::default()),
            }),
        })
    }

    /// Fetch and cache a bearer token
    ///
    /// If an initialization is already in flight the caller joins it instead
    /// of triggering a second token fetch; every joiner observes the same
    /// token or the same failure. A successful explicit initialization also
    /// restores the 401 retry budget.
    ///
    /// # Errors
    ///
    /// Returns [`LictrackError::Authentication`] when the token endpoint
    /// answers with a non-success status or cannot be reached.
    pub async fn initialize(&self) -> Result<String> {
        let token = self.join_or_start_init().await?;
        self.inner.lock_state()?.retry_count = 0;
        Ok(token)
    }

    /// Issue an authenticated request and return the parsed JSON body
    ///
    /// Guarantees a bearer token is attached (initializing on demand) and
    /// recovers from at most one 401 per call by re-fetching the token and
    /// re-issuing the request exactly once. Every failure is recorded in the
    /// session's last-error field before it is propagated.
    ///
    /// `target` is either an absolute URL or a path resolved against the
    /// configured base URL.
    pub async fn request(&self, target: &str, options: RequestOptions) -> Result<Value> {
        let result = self.execute(target, &options).await;
        if let Err(error) = &result {
            if let Ok(mut state) = self.inner.state.lock() {
                state.last_error = Some(error.to_string());
            }
        }
        result
    }

    /// Last recorded failure message, if any
    pub fn error_message(&self) -> Option<String> {
        self.inner
            .state
            .lock()
            .ok()
            .and_then(|state| state.last_error.clone())
    }

    /// Whether the session currently holds a usable token
    ///
    /// Requires both the authenticated flag and a cached token, so a
    /// partially mutated session never reads as authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .state
            .lock()
            .map(|state| state.authenticated && state.token.is_some())
            .unwrap_or(false)
    }

    async fn execute(&self, target: &str, options: &RequestOptions) -> Result<Value> {
        {
            let mut state = self.inner.lock_state()?;
            if state.retry_count >= self.inner.max_retries {
                state.authenticated = false;
                state.token = None;
                return Err(LictrackError::RetryExhausted);
            }
        }

        let cached = self.inner.lock_state()?.token.clone();
        let token = match cached {
            Some(token) => token,
            None => self
                .initialize()
                .await
                .map_err(|e| LictrackError::AuthRequired(e.to_string()))?,
        };

        let url = self.resolve_target(target)?;
        let response = self.send_with_token(url.clone(), options, &token).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            {
                let mut state = self.inner.lock_state()?;
                if state.retry_count >= self.inner.max_retries {
                    state.authenticated = false;
                    state.token = None;
                    return Err(LictrackError::RetryExhausted);
                }
                state.retry_count += 1;
            }

            tracing::warn!(
                "Server returned 401 Unauthorized for {}; re-authenticating and retrying once",
                url
            );

            // Full token re-fetch through the deduplicated path. This does
            // not touch the retry budget; only a successful recovery below
            // or an explicit initialize() restores it.
            let fresh = self.join_or_start_init().await?;
            let retry = self.send_with_token(url, options, &fresh).await?;

            if !retry.status().is_success() {
                return Err(LictrackError::RetryFailed(status_text(retry.status())));
            }
            self.inner.lock_state()?.retry_count = 0;
            return Ok(retry.json().await?);
        }

        if status == StatusCode::FORBIDDEN {
            return Err(LictrackError::Permission);
        }

        if !status.is_success() {
            return Err(LictrackError::Request(status_text(status)));
        }

        Ok(response.json().await?)
    }

    /// Join the in-flight initialization or start a new one
    async fn join_or_start_init(&self) -> Result<String> {
        let fut = {
            let mut state = self.inner.lock_state()?;
            if let Some(existing) = &state.in_flight {
                tracing::debug!("Joining in-flight token initialization");
                existing.clone()
            } else {
                let fut: InitFuture = ClientInner::run_init(Arc::clone(&self.inner))
                    .boxed()
                    .shared();
                state.in_flight = Some(fut.clone());
                fut
            }
        };
        fut.await.map_err(LictrackError::Authentication)
    }

    fn resolve_target(&self, target: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(target) {
            return Ok(url);
        }
        self.inner.base_url.join(target).map_err(|e| {
            LictrackError::Request(format!("invalid request target {}: {}", target, e))
        })
    }

    async fn send_with_token(
        &self,
        url: Url,
        options: &RequestOptions,
        token: &str,
    ) -> Result<reqwest::Response> {
        let method = options.method.clone().unwrap_or(Method::GET);
        let mut request = self
            .inner
            .http
            .request(method, url)
            .headers(build_headers(token, &options.headers)?);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }
        Ok(request.send().await?)
    }
}

impl ClientInner {
    fn lock_state(&self) -> Result<MutexGuard<'_, SessionState>> {
        self.state
            .lock()
            .map_err(|_| LictrackError::Session("session state lock poisoned".to_string()))
    }

    /// Run one initialization attempt and settle the session
    ///
    /// The in-flight handle is cleared on every settle, success or failure,
    /// and the observer is notified after the state mutation is complete.
    async fn run_init(inner: Arc<ClientInner>) -> std::result::Result<String, String> {
        let outcome = inner.fetch_token().await;

        if let Ok(mut state) = inner.state.lock() {
            match &outcome {
                Ok(token) => {
                    state.token = Some(token.clone());
                    state.authenticated = true;
                    state.last_error = None;
                }
                Err(message) => {
                    state.token = None;
                    state.authenticated = false;
                    state.last_error =
                        Some(LictrackError::Authentication(message.clone()).to_string());
                }
            }
            state.in_flight = None;
        }

        match &outcome {
            Ok(_) => inner.notifier.on_auth_state_changed(true),
            Err(message) => {
                inner.notifier.on_auth_state_changed(false);
                inner
                    .notifier
                    .on_error(&LictrackError::Authentication(message.clone()).to_string());
            }
        }

        outcome
    }

    async fn fetch_token(&self) -> std::result::Result<String, String> {
        let url = self
            .base_url
            .join(TOKEN_PATH)
            .map_err(|e| format!("invalid token endpoint URL: {}", e))?;

        tracing::debug!("Requesting access token from {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Failed to get access token: {}", e))?;

        if !response.status().is_success() {
            return Err(format!(
                "Failed to get access token: {}",
                status_text(response.status())
            ));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse token response: {}", e))?;

        tracing::info!("Access token acquired");
        Ok(body.access_token)
    }
}

/// Default headers plus caller overrides
fn build_headers(token: &str, extra: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| LictrackError::Request(format!("invalid bearer token: {}", e)))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| LictrackError::Request(format!("invalid header name {}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            LictrackError::Request(format!("invalid value for header {}: {}", name, e))
        })?;
        // insert (not append) so caller headers replace the defaults
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}
