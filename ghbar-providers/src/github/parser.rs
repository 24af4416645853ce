//! GitHub response parser.

use ghbar_core::Metric;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::error::GithubError;

/// Search API response; only the total is of interest.
#[derive(Debug, Deserialize)]
struct SearchCountResponse {
    total_count: u64,
}

/// Extracts the count for `metric` from a successful response body.
pub fn parse_count(metric: Metric, body: &Value) -> Result<u64, GithubError> {
    match metric {
        Metric::Issues | Metric::PullRequests => parse_total_count(body),
        Metric::Notifications => parse_notification_count(body),
    }
}

/// Reads `total_count` from a search response.
pub fn parse_total_count(body: &Value) -> Result<u64, GithubError> {
    let response = SearchCountResponse::deserialize(body)
        .map_err(|e| GithubError::MalformedResponse(format!("search count: {e}")))?;
    debug!(total_count = response.total_count, "Parsed search count");
    Ok(response.total_count)
}

/// Counts the entries of a notification listing.
pub fn parse_notification_count(body: &Value) -> Result<u64, GithubError> {
    let items = body.as_array().ok_or_else(|| {
        GithubError::MalformedResponse("notifications: expected a JSON array".to_string())
    })?;
    Ok(items.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_total_count() {
        let body = json!({"total_count": 42, "incomplete_results": false, "items": []});
        assert_eq!(parse_total_count(&body).unwrap(), 42);
        assert_eq!(parse_count(Metric::PullRequests, &body).unwrap(), 42);
    }

    #[test]
    fn test_parse_total_count_zero() {
        let body = json!({"total_count": 0, "items": []});
        assert_eq!(parse_count(Metric::Issues, &body).unwrap(), 0);
    }

    #[test]
    fn test_parse_total_count_malformed() {
        assert!(matches!(
            parse_total_count(&json!({"message": "Bad credentials"})),
            Err(GithubError::MalformedResponse(_))
        ));
        assert!(parse_total_count(&json!({"total_count": -1})).is_err());
        assert!(parse_total_count(&json!({"total_count": "3"})).is_err());
    }

    #[test]
    fn test_parse_notification_count() {
        let body = json!([{"id": "1", "unread": true}, {"id": "2", "unread": true}]);
        assert_eq!(parse_count(Metric::Notifications, &body).unwrap(), 2);
        assert_eq!(parse_notification_count(&json!([])).unwrap(), 0);
        assert!(parse_notification_count(&json!({"total_count": 2})).is_err());
    }
}
