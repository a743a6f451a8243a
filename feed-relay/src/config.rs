//! Relay configuration assembled once at startup.

use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Everything the relay needs to reach the downstream notification service.
///
/// Constructed once in the host binary and handed into the relay and
/// dispatcher by value; nothing in this workspace reads configuration from
/// process-global state. The directory and ping endpoints are precomputed
/// here so request paths never assemble URLs ad hoc.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    following_url: Url,
    ping_url: Url,
    notify_secret: String,
    refresh_interval: Duration,
}

impl RelayConfig {
    /// Derives the `following` and `ping` endpoints under `notify_base`,
    /// attaching the shared secret as a query parameter where the directory
    /// expects it.
    pub fn new(
        notify_base: &Url,
        notify_secret: impl Into<String>,
        refresh_interval: Duration,
    ) -> Result<Self, ConfigError> {
        let notify_secret = notify_secret.into();

        // Url::join drops the last path segment unless the base ends in '/'.
        let mut base = notify_base.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let mut following_url = base.join("following")?;
        following_url
            .query_pairs_mut()
            .append_pair("secret", &notify_secret);
        let ping_url = base.join("ping")?;

        Ok(Self {
            following_url,
            ping_url,
            notify_secret,
            refresh_interval,
        })
    }

    /// Directory endpoint, secret included.
    pub fn following_url(&self) -> &Url {
        &self.following_url
    }

    /// Notification endpoint.
    pub fn ping_url(&self) -> &Url {
        &self.ping_url
    }

    /// Shared secret accompanying every downstream request.
    pub fn notify_secret(&self) -> &str {
        &self.notify_secret
    }

    /// Interval between follow-list refreshes.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}
