//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use ghbar_core::ResponseEnvelope;
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one poll.
#[derive(Debug, Serialize)]
pub struct EnvelopeOutput<'a> {
    pub full_text: &'a str,
    #[serde(serialize_with = "serialize_datetime")]
    pub cached_until: DateTime<Utc>,
    pub urgent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
}

impl<'a> From<&'a ResponseEnvelope> for EnvelopeOutput<'a> {
    fn from(envelope: &'a ResponseEnvelope) -> Self {
        Self {
            full_text: &envelope.full_text,
            cached_until: envelope.cached_until,
            urgent: envelope.urgent,
            color: envelope.color.as_deref(),
        }
    }
}

fn serialize_datetime<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats one poll result.
    pub fn format_envelope(&self, envelope: &ResponseEnvelope) -> Result<String> {
        self.format(&EnvelopeOutput::from(envelope))
    }
}
