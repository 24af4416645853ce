//! Desktop host for providers run from the command line.

use chrono::{DateTime, Utc};
use ghbar_core::Host;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Title shown on desktop notifications.
const NOTIFICATION_TITLE: &str = "ghbar";

/// [`Host`] backed by the wall clock, `notify-send` and the default URL handler.
#[derive(Debug, Clone, Default)]
pub struct SystemHost {
    notifier: Option<PathBuf>,
}

impl SystemHost {
    /// Creates a host, looking up `notify-send` on `PATH` once.
    pub fn new() -> Self {
        let notifier = which::which("notify-send").ok();
        debug!(notifier = ?notifier, "Desktop notifier lookup");
        Self::with_notifier(notifier)
    }

    /// Creates a host that delivers notifications through `notifier`.
    pub fn with_notifier(notifier: Option<PathBuf>) -> Self {
        Self { notifier }
    }

    /// Runs the notifier on a background task that waits for it to exit.
    ///
    /// Returns `None` when there is no notifier or no runtime to run it on.
    fn deliver(&self, message: &str) -> Option<JoinHandle<io::Result<ExitStatus>>> {
        let notifier = self.notifier.clone()?;
        let Ok(runtime) = Handle::try_current() else {
            debug!("No async runtime, skipping desktop notification");
            return None;
        };

        let message = message.to_string();
        Some(runtime.spawn(async move {
            let status = Command::new(&notifier)
                .arg(NOTIFICATION_TITLE)
                .arg(&message)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            match &status {
                Ok(status) if !status.success() => debug!(status = %status, "notify-send failed"),
                Err(e) => debug!(error = %e, "Failed to run notify-send"),
                Ok(_) => {}
            }
            status
        }))
    }
}

impl Host for SystemHost {
    fn notify_user(&self, message: &str) {
        warn!("{message}");
        // Fire and forget; the task reaps the child.
        let _ = self.deliver(message);
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn open_url(&self, url: &str) {
        debug!(url = %url, "Opening URL");
        if let Err(e) = open::that_detached(url) {
            warn!(url = %url, error = %e, "Failed to open URL");
        }
    }
}
