//! Cleanup of literal example values before they are echoed.

use serde_json::Value;
use url::Url;

use crate::domain::schema::RESOLVED_REF_KEY;

/// Remove every `$$ref` key whose value is an absolute URL, at any depth.
///
/// Such keys are resolver annotations that leaked into an example; any other
/// `$$ref` value is user data and is kept.
pub fn strip_uri_refs(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, val)| !(key == RESOLVED_REF_KEY && is_uri(val)))
                .map(|(key, val)| (key, strip_uri_refs(val)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_uri_refs).collect()),
        other => other,
    }
}

fn is_uri(value: &Value) -> bool {
    value.as_str().is_some_and(|s| Url::parse(s).is_ok())
}
