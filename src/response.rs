//! Article API response bodies

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"article": ...}` wrapper used for both requests and responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleEnvelope<T> {
    /// Wrapped article
    pub article: T,
}

/// Flattens an error body into `field -> messages`
///
/// Backends send `{"errors": {"title": ["can't be blank"]}}`; some use a bare
/// string instead of an array, or a top-level `message`. Anything else yields
/// an empty map.
pub fn parse_error_body(body: &str) -> BTreeMap<String, Vec<String>> {
    let mut errors = BTreeMap::new();
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return errors;
    };

    if let Some(map) = value.get("errors").and_then(Value::as_object) {
        for (field, messages) in map {
            let messages = match messages {
                Value::Array(items) => items.iter().map(value_to_message).collect(),
                other => vec![value_to_message(other)],
            };
            errors.insert(field.clone(), messages);
        }
    } else if let Some(message) = value.get("message").and_then(Value::as_str) {
        errors.insert("message".to_string(), vec![message.to_string()]);
    }

    errors
}

fn value_to_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
