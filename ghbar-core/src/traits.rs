//! Trait definitions for `ghbar`.
//!
//! [`Host`] is the capability set a status bar lends to its providers;
//! [`StatusProvider`] is what every provider implements in return.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::models::ResponseEnvelope;

/// Capabilities the status-bar host provides to a provider.
///
/// Providers never reach for the wall clock or a notification daemon
/// directly; everything side-effecting goes through here so it can be
/// swapped out in tests.
pub trait Host: Send + Sync {
    /// Shows a message to the user (desktop notification, log line, ...).
    fn notify_user(&self, message: &str);

    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The instant `seconds` from now.
    fn time_in(&self, seconds: u64) -> DateTime<Utc> {
        let now = self.now();
        i64::try_from(seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Opens `url` in the user's default handler.
    fn open_url(&self, url: &str) {
        info!(url = %url, "Host cannot open URLs, ignoring");
    }
}

/// A status-bar module producing one formatted text fragment.
///
/// The host calls [`poll`](StatusProvider::poll) no more often than the
/// previous envelope's `cached_until` and never concurrently.
#[async_trait]
pub trait StatusProvider: Send {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Refreshes the provider and returns what to display.
    ///
    /// Never fails: problems are absorbed into stale or unknown values.
    async fn poll(&mut self, host: &dyn Host) -> ResponseEnvelope;

    /// Reacts to a pointer click on the rendered fragment.
    fn handle_click(&self, button: u8, host: &dyn Host);
}
