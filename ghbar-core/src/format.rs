//! Display template rendering.
//!
//! Templates use `{name}` placeholders, e.g. `"{repo} {issues}/{pull_requests}"`.
//! Rendering never fails: a placeholder without a value is kept verbatim so a
//! misspelled name stays visible in the bar. `{{` and `}}` produce literal braces.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches an escaped brace pair or a `{name}` placeholder.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z0-9_]+)\}").expect("Invalid regex")
});

/// Returns the placeholder names in `template`, in order of appearance.
///
/// Escaped braces are skipped, so `"{{issues}}"` references nothing.
pub fn placeholders(template: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Substitutes placeholders in `template` with values from `values`.
pub fn safe_format(template: &str, values: &HashMap<&str, String>) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &Captures<'_>| match caps.get(1) {
            Some(name) => values
                .get(name.as_str())
                .cloned()
                .unwrap_or_else(|| caps[0].to_string()),
            None if &caps[0] == "{{" => "{".to_string(),
            None => "}".to_string(),
        })
        .into_owned()
}
