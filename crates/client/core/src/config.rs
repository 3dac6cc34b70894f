//! Client retry configuration.
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Pause before re-sending after a transient transport failure.
    pub retry_backoff: Duration,
    /// Session refreshes allowed while serving a single call.
    pub max_session_refreshes: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry_backoff: Duration::from_secs(10),
            max_session_refreshes: 1,
        }
    }
}
