//! Per-metric stale-value cache.
//!
//! Once a metric has been observed it never goes back to unknown: every
//! failed query reports the last good value instead.

use ghbar_core::{Metric, MetricValue};
use ghbar_fetch::QueryOutcome;
use tracing::{debug, warn};

use super::parser::parse_count;

/// Last known-good value for each metric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaleCache {
    issues: MetricValue,
    pull_requests: MetricValue,
    notifications: MetricValue,
}

impl StaleCache {
    /// Creates a cache with every metric unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `metric`.
    pub fn get(&self, metric: Metric) -> MetricValue {
        match metric {
            Metric::Issues => self.issues,
            Metric::PullRequests => self.pull_requests,
            Metric::Notifications => self.notifications,
        }
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut MetricValue {
        match metric {
            Metric::Issues => &mut self.issues,
            Metric::PullRequests => &mut self.pull_requests,
            Metric::Notifications => &mut self.notifications,
        }
    }

    /// Records a confirmed count. Zero is a real value and overwrites.
    pub fn store(&mut self, metric: Metric, count: u64) {
        *self.slot_mut(metric) = MetricValue::Count(count);
    }

    /// Turns a query outcome into the value to report.
    ///
    /// A successful, well-formed response updates the cache; anything else
    /// leaves it untouched and reports the cached value.
    pub fn resolve(&mut self, metric: Metric, outcome: &QueryOutcome) -> MetricValue {
        let QueryOutcome::Success(body) = outcome else {
            debug!(metric = %metric, outcome = %outcome, "Query failed, using cached value");
            return self.get(metric);
        };

        match parse_count(metric, body) {
            Ok(count) => {
                self.store(metric, count);
                MetricValue::Count(count)
            }
            Err(e) => {
                warn!(metric = %metric, error = %e, "Unexpected payload, using cached value");
                self.get(metric)
            }
        }
    }
}
