//! Integration tests for templates and envelopes.

use chrono::Utc;
use ghbar_core::format::{placeholders, safe_format};
use ghbar_core::{Metric, MetricValue, ResponseEnvelope};
use std::collections::HashMap;

#[test]
fn test_metric_placeholders_drive_template() {
    let template = "{repo} {issues}/{pull_requests}{notifications}";
    let referenced = placeholders(template);

    for metric in Metric::ALL {
        assert!(referenced.iter().any(|p| p == metric.placeholder()));
    }
}

#[test]
fn test_unknown_values_render_as_question_marks() {
    let mut values = HashMap::new();
    values.insert("repo", "acme/widgets".to_string());
    values.insert("issues", MetricValue::Unknown.to_string());
    values.insert("pull_requests", MetricValue::Unknown.to_string());
    values.insert("notifications", String::new());

    let text = safe_format("{repo} {issues}/{pull_requests}{notifications}", &values);
    assert_eq!(text, "acme/widgets ?/?");
}

#[test]
fn test_envelope_json_shape() {
    let now = Utc::now();
    let envelope = ResponseEnvelope::new("acme/widgets 3/5", now).with_urgent(true);
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["full_text"], "acme/widgets 3/5");
    assert_eq!(json["urgent"], true);
    assert!(json["cached_until"].is_string());

    let parsed: ResponseEnvelope = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, envelope);
}
