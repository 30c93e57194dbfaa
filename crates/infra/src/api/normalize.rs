//! Error message normalization
//!
//! Runs on every failure before anything else looks at it. The server's
//! error body is searched for a human-readable message in the fields
//! `message`, `error`, `detail`, `code` (first non-empty wins); when one is
//! found it replaces the transport's default message. Failures without a
//! body keep their default message.

use serde_json::Value;

use super::errors::Failure;

/// Body fields searched for a message, in priority order.
const MESSAGE_FIELDS: [&str; 4] = ["message", "error", "detail", "code"];

/// Rewrite `failure.message` from its body. Idempotent.
pub fn normalize(failure: &mut Failure) {
    let Some(body) = failure.body.as_ref() else {
        return;
    };

    if failure.code.is_none() {
        failure.code = body.get("code").and_then(non_empty_text);
    }

    if let Some(message) = extract_message(body) {
        failure.message = message;
    }
}

/// Find the first non-empty message in an error body.
pub fn extract_message(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => {
            MESSAGE_FIELDS.iter().filter_map(|field| map.get(*field)).find_map(field_message)
        }
        // Some endpoints answer with a bare string body.
        Value::String(_) => non_empty_text(body),
        _ => None,
    }
}

fn field_message(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) => extract_message(value),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(non_empty_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => non_empty_text(other),
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
