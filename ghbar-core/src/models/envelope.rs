//! Response envelope returned by every provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Response Envelope
// ============================================================================

/// What a provider hands back to the host after each poll.
///
/// The host renders `full_text` and must not poll the provider again before
/// `cached_until`. A provider that cannot make a confident report yet sets
/// `cached_until` to the current instant, asking to be polled again at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Rendered display text.
    pub full_text: String,
    /// Instant before which the host must not poll again.
    pub cached_until: DateTime<Utc>,
    /// Whether the host should highlight this fragment.
    #[serde(default)]
    pub urgent: bool,
    /// Optional display color (e.g. `#FF0000`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ResponseEnvelope {
    /// Creates a non-urgent envelope without a color.
    pub fn new(full_text: impl Into<String>, cached_until: DateTime<Utc>) -> Self {
        Self {
            full_text: full_text.into(),
            cached_until,
            urgent: false,
            color: None,
        }
    }

    /// Sets the urgency flag.
    #[must_use]
    pub fn with_urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    /// Returns true once `now` has reached the cache-until instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.cached_until
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_defaults() {
        let now = Utc::now();
        let envelope = ResponseEnvelope::new("acme/widgets ?/?", now);
        assert_eq!(envelope.full_text, "acme/widgets ?/?");
        assert!(!envelope.urgent);
        assert!(envelope.color.is_none());
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let envelope = ResponseEnvelope::new("x", now + Duration::seconds(60));
        assert!(!envelope.is_expired(now));
        assert!(envelope.is_expired(now + Duration::seconds(60)));

        let immediate = ResponseEnvelope::new("x", now);
        assert!(immediate.is_expired(now));
    }

    #[test]
    fn test_color_omitted_when_absent() {
        let envelope = ResponseEnvelope::new("x", Utc::now());
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("color").is_none());
        assert_eq!(json["urgent"], false);

        let colored = envelope.with_color(Some("#FF0000".to_string()));
        let json = serde_json::to_value(&colored).unwrap();
        assert_eq!(json["color"], "#FF0000");
    }
}
