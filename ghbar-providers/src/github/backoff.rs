//! Rate-limit backoff, one slot per GitHub quota.
//!
//! GitHub meters the search API separately from the core API, so running
//! out of search requests must not stop notification queries.

use chrono::{DateTime, Utc};
use ghbar_core::Metric;

/// A separately metered GitHub quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quota {
    /// `/search/*` endpoints (issue and pull request counts).
    Search,
    /// Everything else, including `/notifications`.
    Core,
}

impl Quota {
    /// The quota a metric's query is charged against.
    pub fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Issues | Metric::PullRequests => Self::Search,
            Metric::Notifications => Self::Core,
        }
    }
}

/// Reset instants for exhausted quotas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Backoff {
    search: Option<DateTime<Utc>>,
    core: Option<DateTime<Utc>>,
}

impl Backoff {
    fn slot_mut(&mut self, quota: Quota) -> &mut Option<DateTime<Utc>> {
        match quota {
            Quota::Search => &mut self.search,
            Quota::Core => &mut self.core,
        }
    }

    /// Reset instant of `quota`, if it is backed off.
    pub fn until(&self, quota: Quota) -> Option<DateTime<Utc>> {
        match quota {
            Quota::Search => self.search,
            Quota::Core => self.core,
        }
    }

    /// Marks `quota` exhausted until `reset_at`.
    pub fn exhaust(&mut self, quota: Quota, reset_at: DateTime<Utc>) {
        *self.slot_mut(quota) = Some(reset_at);
    }

    /// Returns the reset instant if `quota` is still exhausted at `now`,
    /// clearing the slot once it has passed.
    pub fn active(&mut self, quota: Quota, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let slot = self.slot_mut(quota);
        match *slot {
            Some(until) if now < until => Some(until),
            _ => {
                *slot = None;
                None
            }
        }
    }

    /// Earliest instant any of `metrics` may be queried again, or `None` if
    /// at least one of them is not backed off.
    pub fn all_blocked_until(&self, metrics: &[Metric]) -> Option<DateTime<Utc>> {
        metrics
            .iter()
            .map(|metric| self.until(Quota::for_metric(*metric)))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_quota_per_metric() {
        assert_eq!(Quota::for_metric(Metric::Issues), Quota::Search);
        assert_eq!(Quota::for_metric(Metric::PullRequests), Quota::Search);
        assert_eq!(Quota::for_metric(Metric::Notifications), Quota::Core);
    }

    #[test]
    fn test_quotas_are_independent() {
        let now = Utc::now();
        let mut backoff = Backoff::default();
        backoff.exhaust(Quota::Search, now + Duration::seconds(60));

        assert!(backoff.active(Quota::Search, now).is_some());
        assert!(backoff.active(Quota::Core, now).is_none());
    }

    #[test]
    fn test_active_clears_after_reset() {
        let now = Utc::now();
        let mut backoff = Backoff::default();
        backoff.exhaust(Quota::Core, now + Duration::seconds(5));

        assert!(backoff.active(Quota::Core, now + Duration::seconds(5)).is_none());
        assert!(backoff.until(Quota::Core).is_none());
    }

    #[test]
    fn test_all_blocked_until() {
        let now = Utc::now();
        let soon = now + Duration::seconds(30);
        let later = now + Duration::seconds(90);
        let mut backoff = Backoff::default();
        backoff.exhaust(Quota::Search, later);

        let counts = [Metric::Issues, Metric::PullRequests];
        assert_eq!(backoff.all_blocked_until(&counts), Some(later));
        assert_eq!(backoff.all_blocked_until(&[Metric::Issues, Metric::Notifications]), None);

        backoff.exhaust(Quota::Core, soon);
        assert_eq!(backoff.all_blocked_until(&[Metric::Issues, Metric::Notifications]), Some(soon));
        assert_eq!(backoff.all_blocked_until(&[]), None);
    }
}
