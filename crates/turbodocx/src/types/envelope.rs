//! Response envelope handling.
//!
//! Some endpoints wrap their payload as `{"data": ...}`, others return it
//! bare. A body whose top-level value is an object with exactly one key,
//! `data`, is unwrapped before decoding; every other body is decoded as-is.
//!
//! A payload whose only field is legitimately named `data` is unwrapped one
//! level too far. Use `.raw_envelope()` on the call to opt out.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Strip a sole `data` wrapper from a JSON value.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Parse a response body, treating an empty body as JSON `null`.
pub fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
}

/// Decode a successful response body into `T`.
///
/// With `unwrap` set, a sole `{"data": ...}` wrapper is removed first.
pub fn decode_body<T: DeserializeOwned>(body: &[u8], unwrap: bool) -> Result<T, serde_json::Error> {
    let value = parse_body(body)?;
    let value = if unwrap { unwrap_data(value) } else { value };
    serde_json::from_value(value)
}

/// The `{ success, data, message }` envelope used by endpoints that report
/// status next to their payload.
///
/// Such bodies have more than one key and are never unwrapped automatically;
/// decode into `Enveloped<T>` to reach the payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enveloped<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Enveloped<T> {
    /// Discard the envelope and keep the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}
