//! Bearer-token session handling for the license server
//!
//! The client ([`AuthClient`]) lazily fetches a token, deduplicates
//! concurrent initialization attempts, and transparently retries a request
//! once after re-authenticating on 401. Presentation is delegated to an
//! [`AuthNotifier`] observer.

mod client;
mod notifier;

pub use client::{AuthClient, RequestOptions};
pub use notifier::{AuthNotifier, NoopNotifier, TracingNotifier};
