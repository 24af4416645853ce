//! Metrics tracked by the polling providers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Metric
// ============================================================================

/// One independently refreshed, independently cached count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Open issues in the repository.
    Issues,
    /// Open pull requests in the repository.
    PullRequests,
    /// Unread notifications for the user.
    Notifications,
}

impl Metric {
    /// Every metric, in rendering order.
    pub const ALL: [Metric; 3] = [Metric::Issues, Metric::PullRequests, Metric::Notifications];

    /// Name of the template placeholder that references this metric.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::PullRequests => "pull_requests",
            Self::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.placeholder())
    }
}

// ============================================================================
// Metric Value
// ============================================================================

/// The value reported for a metric.
///
/// `Unknown` means no successful observation has been made yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    /// Never observed.
    #[default]
    Unknown,
    /// Last observed count.
    Count(u64),
}

impl MetricValue {
    /// Returns true for a known, non-zero count.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Count(n) if n > 0)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("?"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl From<u64> for MetricValue {
    fn from(n: u64) -> Self {
        Self::Count(n)
    }
}
