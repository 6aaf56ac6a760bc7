//! Request body parsing
//!
//! A body counts as JSON only when it is declared as JSON, parses, and is a
//! non-empty object. Everything else is reported by the handlers as
//! "Not a JSON", so this module never fails: it answers `None`.

use serde_json::{Map, Value};

/// Parsed request body
pub type Payload = Map<String, Value>;

/// Parse a request body given its `Content-Type` header value
pub fn parse_json_body(content_type: Option<&str>, bytes: &[u8]) -> Option<Payload> {
    if !content_type.is_some_and(is_json_content_type) {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes).ok()? {
        Value::Object(obj) if !obj.is_empty() => Some(obj),
        _ => None,
    }
}

/// `application/json` or any `+json` suffix type, parameters ignored
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
