//! GitHub endpoint construction.

use ghbar_core::Metric;

use super::config::NotificationScope;

/// Page opened when the notification button is clicked.
pub const GITHUB_NOTIFICATION_URL: &str = "https://github.com/notifications";

/// Notifications fetched per request; the count saturates here.
const NOTIFICATIONS_PER_PAGE: u32 = 100;

/// Search URL counting open issues or pull requests in `repo`.
///
/// Returns `None` for [`Metric::Notifications`], which is not a search count.
pub fn count_url(api_base: &str, repo: &str, metric: Metric) -> Option<String> {
    let kind = match metric {
        Metric::Issues => "issue",
        Metric::PullRequests => "pr",
        Metric::Notifications => return None,
    };
    Some(format!(
        "{}/search/issues?q=state:open+type:{kind}+repo:{repo}&per_page=1",
        api_base.trim_end_matches('/')
    ))
}

/// Notification listing URL, repo-scoped only when asked for and a repo is set.
pub fn notifications_url(api_base: &str, repo: &str, scope: NotificationScope) -> String {
    let base = api_base.trim_end_matches('/');
    if scope == NotificationScope::All || repo.is_empty() {
        format!("{base}/notifications?per_page={NOTIFICATIONS_PER_PAGE}")
    } else {
        format!("{base}/repos/{repo}/notifications?per_page={NOTIFICATIONS_PER_PAGE}")
    }
}
