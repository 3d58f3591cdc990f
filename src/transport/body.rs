use serde_json::Value;

/// Response body classified by shape.
///
/// Nuntium answers some lookups for unknown entities with a bare JSON string
/// (or plain text) instead of an object, so every lookup first decides which
/// of the two it got.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A JSON object, array, number, boolean or `null`.
    Structured(Value),
    /// A JSON string, or a body that is not JSON at all (including empty).
    Text(String),
}

pub fn classify_body(body: &str) -> ResponseBody {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => ResponseBody::Text(text),
        Ok(value) => ResponseBody::Structured(value),
        Err(_) => ResponseBody::Text(body.to_owned()),
    }
}
