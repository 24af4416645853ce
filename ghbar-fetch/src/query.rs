//! Remote query client for counted, rate-limited APIs.
//!
//! A query is exactly one GET attempt. Retrying is the host's business: it
//! polls the provider again on its own cadence, so a failure here just
//! means "use what you had last time".

use async_trait::async_trait;
use ghbar_core::Credentials;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::HttpError;
use crate::host::http::{github_headers, HttpClient, RateLimit, ResponseExt, DEFAULT_TIMEOUT_SECS};

// ============================================================================
// Query Outcome
// ============================================================================

/// Classified result of a single remote query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// HTTP 200 with a JSON body.
    Success(serde_json::Value),
    /// HTTP 404: the resource does not exist or is not visible to us.
    NotFound,
    /// HTTP 422: the query itself was rejected (e.g. unknown repository).
    Unprocessable,
    /// No HTTP response at all (refused, DNS, timeout).
    ConnectionFailure,
    /// Any other status code.
    OtherHttpStatus {
        /// The status code received.
        status: u16,
        /// Quota information when the server says we ran out.
        rate_limit: Option<RateLimit>,
    },
    /// HTTP 200 whose body could not be decoded.
    Malformed(String),
}

impl QueryOutcome {
    /// Returns true for outcomes caused by a bad or inaccessible repository.
    pub fn is_repo_error(&self) -> bool {
        matches!(self, Self::NotFound | Self::Unprocessable)
    }

    /// The exhausted rate limit carried by this outcome, if any.
    pub fn exhausted_rate_limit(&self) -> Option<RateLimit> {
        match self {
            Self::OtherHttpStatus {
                rate_limit: Some(limit),
                ..
            } if limit.is_exhausted() => Some(*limit),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::NotFound => "not_found",
            Self::Unprocessable => "unprocessable",
            Self::ConnectionFailure => "connection_failure",
            Self::OtherHttpStatus { .. } => "other_http_status",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OtherHttpStatus { status, .. } => write!(f, "HTTP {status}"),
            Self::Malformed(reason) => write!(f, "malformed response: {reason}"),
            other => f.write_str(other.label()),
        }
    }
}

// ============================================================================
// Remote Query Trait
// ============================================================================

/// Issues one GET against a remote API and classifies the result.
///
/// Implementations never return errors; every failure mode is a
/// [`QueryOutcome`] variant.
#[async_trait]
pub trait RemoteQuery: Send + Sync {
    /// Queries `url`, authenticating with `credentials` when given.
    async fn query(&self, url: &str, credentials: Option<&Credentials>) -> QueryOutcome;
}

// ============================================================================
// GitHub Query Client
// ============================================================================

/// Public GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// [`RemoteQuery`] implementation for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubQueryClient {
    http: HttpClient,
}

impl GithubQueryClient {
    /// Creates a client for `api.github.com` with a 10 second timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::for_base_url(GITHUB_API_URL)
    }

    /// Creates a client that only talks to the host of `base_url`
    /// (e.g. a GitHub Enterprise API root).
    pub fn for_base_url(base_url: &str) -> Result<Self, HttpError> {
        let parsed = Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?
            .to_string();

        let http = HttpClient::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?
            .with_allowed_domains(vec![host]);
        Ok(Self { http })
    }
}

#[async_trait]
impl RemoteQuery for GithubQueryClient {
    #[instrument(skip(self, credentials), fields(url = %url))]
    async fn query(&self, url: &str, credentials: Option<&Credentials>) -> QueryOutcome {
        let response = match self.http.get(url, github_headers(), credentials).await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Query failed before a response arrived");
                return QueryOutcome::ConnectionFailure;
            }
        };

        let status = response.status();
        match status {
            StatusCode::OK => match response.bytes().await {
                Ok(body) => classify_body(&body),
                Err(e) => {
                    debug!(error = %e, "Failed to read response body");
                    QueryOutcome::ConnectionFailure
                }
            },
            StatusCode::NOT_FOUND => QueryOutcome::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => QueryOutcome::Unprocessable,
            _ => {
                let rate_limit = if response.is_rate_limited() {
                    let limit = response.rate_limit();
                    warn!(
                        status = %status,
                        reset_at = ?limit.map(|l| l.reset_at),
                        "Rate limit exhausted"
                    );
                    limit
                } else {
                    debug!(status = %status, "Unexpected status");
                    None
                };
                QueryOutcome::OtherHttpStatus {
                    status: status.as_u16(),
                    rate_limit,
                }
            }
        }
    }
}

/// Decodes a 200 body into an outcome.
fn classify_body(body: &[u8]) -> QueryOutcome {
    match serde_json::from_slice(body) {
        Ok(value) => QueryOutcome::Success(value),
        Err(e) => {
            warn!(error = %e, "Response body is not valid JSON");
            QueryOutcome::Malformed(e.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
