//! GitHub status provider.
//!
//! Each poll queries only the metrics the display template references. The
//! very first poll queries nothing and asks to be called again immediately,
//! so a status bar can start up without waiting on the network.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ghbar_core::format::{placeholders, safe_format};
use ghbar_core::{Credentials, Host, Metric, MetricValue, ResponseEnvelope, StatusProvider};
use ghbar_fetch::{QueryOutcome, RemoteQuery};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use super::api::{count_url, notifications_url, GITHUB_NOTIFICATION_URL};
use super::backoff::{Backoff, Quota};
use super::cache::StaleCache;
use super::config::GithubConfig;
use super::error::GithubError;
use super::warnings::WarningLatch;

// ============================================================================
// Poller State
// ============================================================================

/// Where the poller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    /// No poll has completed yet; queries are skipped.
    #[default]
    FirstPoll,
    /// Real queries are issued.
    Steady,
}

/// State carried between polls for the lifetime of the provider.
#[derive(Debug, Clone, Default)]
pub struct PollerState {
    /// Lifecycle phase.
    pub phase: PollPhase,
    /// Last known-good metric values.
    pub cache: StaleCache,
    /// One-shot warning flags.
    pub warnings: WarningLatch,
    /// Exhausted quotas; queries charged to one are skipped until its reset.
    pub backoff: Backoff,
}

// ============================================================================
// Provider
// ============================================================================

/// Polls GitHub for open issues, open pull requests, and unread notifications.
pub struct GithubProvider {
    config: GithubConfig,
    credentials: Option<Credentials>,
    client: Box<dyn RemoteQuery>,
    state: PollerState,
}

impl GithubProvider {
    /// Creates a provider that issues its queries through `client`.
    pub fn new(config: GithubConfig, client: Box<dyn RemoteQuery>) -> Self {
        let credentials = config.credentials();
        Self {
            config,
            credentials,
            client,
            state: PollerState::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    /// State carried between polls.
    pub fn state(&self) -> &PollerState {
        &self.state
    }

    /// Metrics referenced by the display template, in rendering order.
    pub fn needed_metrics(&self) -> Vec<Metric> {
        let referenced = placeholders(&self.config.format);
        Metric::ALL
            .into_iter()
            .filter(|metric| referenced.iter().any(|name| name == metric.placeholder()))
            .collect()
    }

    /// Logs `error` and shows its user warning, at most once per kind.
    fn raise(&mut self, error: &GithubError, host: &dyn Host) {
        let Some(kind) = error.warning() else {
            return;
        };
        debug!(error = %error, kind = %kind, "Configuration problem");
        self.state.warnings.warn_once(kind, kind.message(), host);
    }

    /// Resolves one metric, querying the API when the state allows it.
    async fn resolve(&mut self, metric: Metric, host: &dyn Host) -> MetricValue {
        if metric == Metric::Notifications && self.credentials.is_none() {
            self.raise(&GithubError::MissingCredentials, host);
            return MetricValue::Unknown;
        }

        if self.state.phase == PollPhase::FirstPoll {
            return self.state.cache.get(metric);
        }

        let quota = Quota::for_metric(metric);
        if let Some(until) = self.state.backoff.active(quota, host.now()) {
            debug!(metric = %metric, quota = ?quota, until = %until, "Rate limited, skipping query");
            return self.state.cache.get(metric);
        }

        let Some(url) = self.url_for(metric) else {
            debug!(metric = %metric, "No repository configured, skipping query");
            return self.state.cache.get(metric);
        };

        let outcome = self.client.query(&url, self.credentials.as_ref()).await;
        debug!(metric = %metric, outcome = %outcome, "Query finished");

        if outcome.is_repo_error() {
            self.raise(&GithubError::RepoNotFound(self.config.repo.clone()), host);
        }

        if let Some(limit) = outcome.exhausted_rate_limit() {
            warn!(quota = ?quota, reset_at = %limit.reset_at, "GitHub rate limit exhausted, backing off");
            self.state.backoff.exhaust(quota, limit.reset_at);
        }

        self.state.cache.resolve(metric, &outcome)
    }

    /// Endpoint for `metric`, or `None` when a count needs a repo and none is set.
    fn url_for(&self, metric: Metric) -> Option<String> {
        let base = &self.config.api_base;
        let repo = &self.config.repo;
        match metric {
            Metric::Notifications => Some(notifications_url(base, repo, self.config.notifications)),
            Metric::Issues | Metric::PullRequests if repo.is_empty() => None,
            Metric::Issues | Metric::PullRequests => count_url(base, repo, metric),
        }
    }

    /// Renders the notification badge; empty unless there is something unread.
    fn notification_badge(&self, value: MetricValue) -> String {
        if !value.is_positive() {
            return String::new();
        }
        let mut values = HashMap::new();
        values.insert("count", value.to_string());
        safe_format(&self.config.format_notifications, &values)
    }

    /// Picks the next instant the host may poll at.
    ///
    /// Polling is only deferred past the refresh interval when every needed
    /// metric is waiting on an exhausted quota.
    fn next_cached_until(&self, first: bool, needed: &[Metric], host: &dyn Host) -> DateTime<Utc> {
        if first {
            return host.now();
        }
        let scheduled = host.time_in(self.config.cache_timeout);
        match self.state.backoff.all_blocked_until(needed) {
            Some(until) if until > scheduled => until,
            _ => scheduled,
        }
    }
}

#[async_trait]
impl StatusProvider for GithubProvider {
    fn name(&self) -> &str {
        "github"
    }

    #[instrument(skip_all)]
    async fn poll(&mut self, host: &dyn Host) -> ResponseEnvelope {
        let first = self.state.phase == PollPhase::FirstPoll;
        let needed = self.needed_metrics();
        debug!(repo = %self.config.repo, phase = ?self.state.phase, needed = ?needed, "Polling");

        let mut values: HashMap<&str, String> = HashMap::new();
        values.insert("repo", self.config.repo.clone());

        let mut urgent = false;
        for metric in Metric::ALL {
            let value = if needed.contains(&metric) {
                self.resolve(metric, host).await
            } else {
                self.state.cache.get(metric)
            };

            let rendered = match metric {
                Metric::Notifications => {
                    urgent = needed.contains(&metric) && value.is_positive();
                    self.notification_badge(value)
                }
                Metric::Issues | Metric::PullRequests => value.to_string(),
            };
            values.insert(metric.placeholder(), rendered);
        }

        let full_text = safe_format(&self.config.format, &values);
        let cached_until = self.next_cached_until(first, &needed, host);

        if first {
            info!("First poll complete, switching to steady state");
            self.state.phase = PollPhase::Steady;
        }

        ResponseEnvelope::new(full_text, cached_until)
            .with_urgent(urgent)
            .with_color(self.config.color.clone())
    }

    fn handle_click(&self, button: u8, host: &dyn Host) {
        let trigger = self.config.button_notifications;
        if trigger != 0 && trigger == button {
            debug!(button, "Opening notifications page");
            host.open_url(GITHUB_NOTIFICATION_URL);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ghbar_fetch::RateLimit;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays queued outcomes and records every URL asked for.
    #[derive(Clone, Default)]
    struct ScriptedQuery {
        outcomes: Arc<Mutex<VecDeque<QueryOutcome>>>,
        urls: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedQuery {
        fn push(&self, outcome: QueryOutcome) {
            self.outcomes.lock().unwrap().push_back(outcome);
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteQuery for ScriptedQuery {
        async fn query(&self, url: &str, _credentials: Option<&Credentials>) -> QueryOutcome {
            self.urls.lock().unwrap().push(url.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(QueryOutcome::ConnectionFailure)
        }
    }

    struct TestHost {
        now: Mutex<DateTime<Utc>>,
        messages: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                now: Mutex::new(Utc::now()),
                messages: Mutex::new(Vec::new()),
                opened: Mutex::new(Vec::new()),
            }
        }

        fn advance(&self, seconds: i64) {
            *self.now.lock().unwrap() += chrono::Duration::seconds(seconds);
        }
    }

    impl Host for TestHost {
        fn notify_user(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }

        fn open_url(&self, url: &str) {
            self.opened.lock().unwrap().push(url.to_string());
        }
    }

    fn provider(format: &str, query: &ScriptedQuery) -> GithubProvider {
        let config = GithubConfig {
            repo: "acme/widgets".to_string(),
            format: format.to_string(),
            username: Some("octocat".to_string()),
            auth_token: Some("t0ken".to_string()),
            ..Default::default()
        };
        GithubProvider::new(config, Box::new(query.clone()))
    }

    #[test]
    fn test_needed_metrics_follow_template() {
        let query = ScriptedQuery::default();
        let p = provider("{repo} {issues}", &query);
        assert_eq!(p.needed_metrics(), vec![Metric::Issues]);

        let p = provider("{notifications} {pull_requests}", &query);
        assert_eq!(p.needed_metrics(), vec![Metric::PullRequests, Metric::Notifications]);
    }

    #[tokio::test]
    async fn test_phase_transition() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let mut p = provider("{issues}", &query);

        assert_eq!(p.state().phase, PollPhase::FirstPoll);
        p.poll(&host).await;
        assert_eq!(p.state().phase, PollPhase::Steady);
    }

    #[tokio::test]
    async fn test_steady_cache_until_uses_interval() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let mut p = provider("{issues}", &query);

        p.poll(&host).await;
        query.push(QueryOutcome::Success(json!({"total_count": 1})));
        let envelope = p.poll(&host).await;
        assert_eq!(envelope.cached_until, host.time_in(60));
    }

    #[tokio::test]
    async fn test_rate_limit_defers_next_poll_and_skips_queries() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let mut p = provider("{issues}/{pull_requests}", &query);
        p.poll(&host).await;

        let reset_at = host.now() + chrono::Duration::seconds(900);
        query.push(QueryOutcome::OtherHttpStatus {
            status: 403,
            rate_limit: Some(RateLimit {
                remaining: 0,
                reset_at,
            }),
        });
        let envelope = p.poll(&host).await;

        // Both counts share the search quota, so the second was skipped.
        assert_eq!(query.urls().len(), 1);
        assert_eq!(envelope.cached_until, reset_at);
        assert_eq!(envelope.full_text, "?/?");

        host.advance(901);
        query.push(QueryOutcome::Success(json!({"total_count": 2})));
        query.push(QueryOutcome::Success(json!({"total_count": 3})));
        let envelope = p.poll(&host).await;
        assert_eq!(envelope.full_text, "2/3");
        assert!(p.state().backoff.until(Quota::Search).is_none());
    }

    #[tokio::test]
    async fn test_search_backoff_leaves_notifications_alone() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let mut p = provider("{issues}{notifications}", &query);
        p.poll(&host).await;

        let reset_at = host.now() + chrono::Duration::seconds(900);
        query.push(QueryOutcome::OtherHttpStatus {
            status: 403,
            rate_limit: Some(RateLimit {
                remaining: 0,
                reset_at,
            }),
        });
        query.push(QueryOutcome::Success(json!([{}, {}])));
        let envelope = p.poll(&host).await;

        let urls = query.urls();
        assert_eq!(urls.len(), 2);
        assert!(urls[1].contains("/notifications"));
        assert_eq!(envelope.full_text, "? 🔔2");
        assert!(envelope.urgent);
        // Notifications still refresh on the normal interval.
        assert_eq!(envelope.cached_until, host.time_in(60));

        // Next poll: search stays backed off, notifications are queried again.
        query.push(QueryOutcome::Success(json!([{}])));
        let envelope = p.poll(&host).await;
        let urls = query.urls();
        assert_eq!(urls.len(), 3);
        assert!(urls[2].contains("/notifications"));
        assert_eq!(envelope.full_text, "? 🔔1");
        assert_eq!(p.state().backoff.until(Quota::Search), Some(reset_at));
        assert!(p.state().backoff.until(Quota::Core).is_none());
    }

    #[tokio::test]
    async fn test_core_backoff_leaves_counts_alone() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let mut p = provider("{issues}{notifications}", &query);
        p.poll(&host).await;

        let reset_at = host.now() + chrono::Duration::seconds(300);
        query.push(QueryOutcome::Success(json!({"total_count": 4})));
        query.push(QueryOutcome::OtherHttpStatus {
            status: 429,
            rate_limit: Some(RateLimit {
                remaining: 0,
                reset_at,
            }),
        });
        p.poll(&host).await;

        query.push(QueryOutcome::Success(json!({"total_count": 5})));
        let envelope = p.poll(&host).await;
        let urls = query.urls();
        assert_eq!(urls.len(), 3);
        assert!(urls[2].contains("/search/issues"));
        assert_eq!(envelope.full_text, "5");
    }

    #[tokio::test]
    async fn test_empty_repo_skips_count_queries() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let config = GithubConfig {
            repo: String::new(),
            format: "{issues}/{pull_requests}".to_string(),
            ..Default::default()
        };
        let mut p = GithubProvider::new(config, Box::new(query.clone()));

        p.poll(&host).await;
        let envelope = p.poll(&host).await;
        assert!(query.urls().is_empty());
        assert_eq!(envelope.full_text, "?/?");
    }

    #[tokio::test]
    async fn test_color_passes_through() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let config = GithubConfig {
            color: Some("#00FF00".to_string()),
            ..Default::default()
        };
        let mut p = GithubProvider::new(config, Box::new(query));
        let envelope = p.poll(&host).await;
        assert_eq!(envelope.color.as_deref(), Some("#00FF00"));
    }

    #[test]
    fn test_click_opens_notifications_page() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let p = provider("{issues}", &query);

        p.handle_click(3, &host);
        assert!(host.opened.lock().unwrap().is_empty());

        p.handle_click(1, &host);
        assert_eq!(*host.opened.lock().unwrap(), [GITHUB_NOTIFICATION_URL]);
    }

    #[test]
    fn test_click_disabled_with_zero_button() {
        let query = ScriptedQuery::default();
        let host = TestHost::new();
        let config = GithubConfig {
            button_notifications: 0,
            ..Default::default()
        };
        let p = GithubProvider::new(config, Box::new(query));

        p.handle_click(0, &host);
        p.handle_click(1, &host);
        assert!(host.opened.lock().unwrap().is_empty());
    }
}
