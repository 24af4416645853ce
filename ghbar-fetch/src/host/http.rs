//! HTTP client with tracing, basic auth, and domain allowlist.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Domain allowlist so credentials are only ever sent to known hosts
//! - Rate-limit header parsing

use chrono::{DateTime, Utc};
use ghbar_core::Credentials;
use reqwest::{header, header::HeaderMap, Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User agent string for `ghbar`.
const USER_AGENT: &str = concat!("ghbar/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and domain allowlist.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains (and their subdomains).
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request with custom headers and optional basic auth.
    #[instrument(skip(self, headers, credentials), fields(url = %url, authenticated = credentials.is_some()))]
    pub async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
        credentials: Option<&Credentials>,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("GET request");

        let mut request = self.inner.get(url).headers(headers);
        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(&creds.token));
        }

        let response = request.send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

// ============================================================================
// Rate Limits
// ============================================================================

/// Quota state reported by a rate-limited API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window resets.
    pub reset_at: DateTime<Utc>,
}

impl RateLimit {
    /// Parses `X-RateLimit-Remaining` / `X-RateLimit-Reset` (epoch seconds).
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_value(headers, "x-ratelimit-remaining")?.parse().ok()?;
        let reset_secs: i64 = header_value(headers, "x-ratelimit-reset")?.parse().ok()?;
        let reset_at = DateTime::from_timestamp(reset_secs, 0)?;
        Some(Self {
            remaining,
            reset_at,
        })
    }

    /// Returns true if no requests are left in this window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    fn is_rate_limited(&self) -> bool;

    /// Rate-limit headers, if the server sent them.
    fn rate_limit(&self) -> Option<RateLimit>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        let status = self.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return true;
        }
        // GitHub reports an exhausted primary quota as 403
        status == reqwest::StatusCode::FORBIDDEN
            && self.rate_limit().is_some_and(|limit| limit.is_exhausted())
    }

    fn rate_limit(&self) -> Option<RateLimit> {
        RateLimit::from_headers(self.headers())
    }
}

/// Default headers for the GitHub REST API.
pub fn github_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        "X-GitHub-Api-Version",
        header::HeaderValue::from_static("2022-11-28"),
    );
    headers
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_domain_allowlist() {
        let client = HttpClient::new()
            .unwrap()
            .with_allowed_domains(vec!["github.com".to_string()]);

        assert!(client.is_domain_allowed("https://api.github.com/notifications").is_ok());
        assert!(client.is_domain_allowed("https://github.com/notifications").is_ok());
        assert!(client.is_domain_allowed("https://evil.com/steal").is_err());
        assert!(client.is_domain_allowed("https://notgithub.com/x").is_err());
    }

    #[test]
    fn test_no_domain_restrictions() {
        let client = HttpClient::new().unwrap();
        assert!(client.is_domain_allowed("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new().unwrap();
        assert!(matches!(
            client.is_domain_allowed("not-a-valid-url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        let limit = RateLimit::from_headers(&headers).unwrap();
        assert!(limit.is_exhausted());
        assert_eq!(limit.reset_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_rate_limit_missing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("12"));
        assert!(RateLimit::from_headers(&headers).is_none());

        headers.insert("x-ratelimit-reset", HeaderValue::from_static("soon"));
        assert!(RateLimit::from_headers(&headers).is_none());
    }

    #[test]
    fn test_github_headers() {
        let headers = github_headers();
        assert_eq!(headers[header::ACCEPT], "application/vnd.github+json");
        assert!(headers.contains_key("x-github-api-version"));
    }
}
