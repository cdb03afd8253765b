//! Uniform result envelope returned by every tool
//!
//! Callers inspect the `success` field rather than relying on `Err`.

use agent_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::fmt::Display;

/// Mark a tool result as successful
///
/// Object payloads get `"success": true` merged in; anything else is wrapped
/// under a `data` key.
pub fn success(payload: Value) -> Value {
    match payload {
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len() + 1);
            out.insert("success".to_string(), Value::Bool(true));
            out.extend(fields);
            Value::Object(out)
        }
        other => json!({ "success": true, "data": other }),
    }
}

/// Build the failure envelope for an operation error
pub fn failure(error: impl Display) -> Value {
    json!({
        "success": false,
        "error": error.to_string(),
    })
}

/// Deserialize tool parameters, rejecting input that does not match the schema
pub fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| Error::InvalidParameters(e.to_string()))
}
