//! One-shot user warnings.
//!
//! Each warning kind reaches the user at most once per process. The latch
//! is never reset, even if the condition clears and comes back.

use ghbar_core::Host;
use std::fmt;
use tracing::{debug, warn};

/// Classes of user-facing configuration warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Notifications requested without username and token.
    MissingCredentials,
    /// The configured repository cannot be found.
    RepoNotFound,
}

impl WarningKind {
    /// The message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingCredentials => {
                "Github module needs username and auth_token to check notifications."
            }
            Self::RepoNotFound => "Github repo cannot be found.",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => f.write_str("missing_credentials"),
            Self::RepoNotFound => f.write_str("repo_not_found"),
        }
    }
}

/// Latched "already shown" flags, one per [`WarningKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningLatch {
    missing_credentials_shown: bool,
    repo_not_found_shown: bool,
}

impl WarningLatch {
    /// Creates a latch with nothing shown yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn flag_mut(&mut self, kind: WarningKind) -> &mut bool {
        match kind {
            WarningKind::MissingCredentials => &mut self.missing_credentials_shown,
            WarningKind::RepoNotFound => &mut self.repo_not_found_shown,
        }
    }

    /// Returns true if `kind` has already been delivered.
    pub fn has_warned(&self, kind: WarningKind) -> bool {
        match kind {
            WarningKind::MissingCredentials => self.missing_credentials_shown,
            WarningKind::RepoNotFound => self.repo_not_found_shown,
        }
    }

    /// Delivers `message` through the host unless `kind` was already shown.
    ///
    /// Returns true if the message was delivered by this call.
    pub fn warn_once(&mut self, kind: WarningKind, message: &str, host: &dyn Host) -> bool {
        let shown = self.flag_mut(kind);
        if *shown {
            debug!(kind = %kind, "Warning already shown, suppressing");
            return false;
        }
        *shown = true;
        warn!(kind = %kind, message = %message, "Notifying user");
        host.notify_user(message);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        messages: Mutex<Vec<String>>,
    }

    impl Host for RecordingHost {
        fn notify_user(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    #[test]
    fn test_warn_once_per_kind() {
        let host = RecordingHost::default();
        let mut latch = WarningLatch::new();

        assert!(latch.warn_once(WarningKind::RepoNotFound, "repo gone", &host));
        assert!(!latch.warn_once(WarningKind::RepoNotFound, "repo gone", &host));
        assert!(!latch.warn_once(WarningKind::RepoNotFound, "different text", &host));

        assert_eq!(*host.messages.lock().unwrap(), ["repo gone"]);
        assert!(latch.has_warned(WarningKind::RepoNotFound));
        assert!(!latch.has_warned(WarningKind::MissingCredentials));
    }

    #[test]
    fn test_kinds_latch_independently() {
        let host = RecordingHost::default();
        let mut latch = WarningLatch::new();

        latch.warn_once(WarningKind::RepoNotFound, "a", &host);
        latch.warn_once(WarningKind::MissingCredentials, "b", &host);
        latch.warn_once(WarningKind::MissingCredentials, "b", &host);

        assert_eq!(host.messages.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_messages() {
        assert_eq!(WarningKind::RepoNotFound.message(), "Github repo cannot be found.");
        assert!(WarningKind::MissingCredentials.message().contains("auth_token"));
    }
}
