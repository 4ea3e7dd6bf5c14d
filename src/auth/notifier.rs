//! Observer hooks for authentication state
//!
//! The auth client never renders anything itself; callers register an
//! [`AuthNotifier`] at construction and decide how state changes and error
//! messages are presented.

/// Observer invoked by [`AuthClient`](crate::AuthClient) when the session
/// settles an initialization attempt.
///
/// Implementations must be cheap and non-blocking; they run inline at the
/// settle point of the token fetch.
pub trait AuthNotifier: Send + Sync {
    /// Called whenever an initialization attempt settles, with the new
    /// authentication state.
    fn on_auth_state_changed(&self, authenticated: bool);

    /// Called with a user-facing message when an initialization attempt fails.
    fn on_error(&self, message: &str);
}

/// Notifier that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl AuthNotifier for NoopNotifier {
    fn on_auth_state_changed(&self, _authenticated: bool) {}

    fn on_error(&self, _message: &str) {}
}

/// Notifier that reports events through `tracing`
///
/// Used by the CLI so authentication transitions show up in the log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl AuthNotifier for TracingNotifier {
    fn on_auth_state_changed(&self, authenticated: bool) {
        if authenticated {
            tracing::info!("Authentication state changed: authenticated");
        } else {
            tracing::warn!("Authentication state changed: not authenticated");
        }
    }

    fn on_error(&self, message: &str) {
        tracing::error!("Authentication error: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_notifier_accepts_events() {
        let notifier = NoopNotifier;
        notifier.on_auth_state_changed(true);
        notifier.on_auth_state_changed(false);
        notifier.on_error("ignored");
    }

    #[test]
    fn test_notifiers_are_object_safe() {
        let notifiers: Vec<Box<dyn AuthNotifier>> =
            vec![Box::new(NoopNotifier), Box::new(TracingNotifier)];
        for notifier in &notifiers {
            notifier.on_auth_state_changed(true);
        }
    }
}
