//! GitHub provider implementation.
//!
//! Shows open issue and pull-request counts for a repository plus the
//! number of unread notifications:
//!
//! ```text
//! ultrabug/py3status 12/3 🔔2
//! ```
//!
//! ## Rate Limits
//!
//! GitHub's search API is heavily rate limited, so only metrics referenced
//! by the display template are ever queried, each poll makes at most one
//! request per metric, and an exhausted quota (search and core are metered
//! separately) skips the queries charged to it until its reset time.
//! Authenticated requests get a larger quota.
//!
//! ## API Endpoints
//!
//! - `GET /search/issues?q=state:open+type:issue+repo:{repo}` - Open issues
//! - `GET /search/issues?q=state:open+type:pr+repo:{repo}` - Open pull requests
//! - `GET /notifications` or `GET /repos/{repo}/notifications` - Unread notifications

mod api;
mod backoff;
mod cache;
mod config;
mod error;
pub(crate) mod parser;
mod poller;
mod warnings;

pub use api::{count_url, notifications_url, GITHUB_NOTIFICATION_URL};
pub use backoff::{Backoff, Quota};
pub use cache::StaleCache;
pub use config::{GithubConfig, NotificationScope};
pub use error::GithubError;
pub use poller::{GithubProvider, PollPhase, PollerState};
pub use warnings::{WarningKind, WarningLatch};
