//! Parameter encoding helpers shared by the domain clients.

use serde::Serialize;

use crate::error::{Error, Result};

/// Request parameters, in the order they were added.
pub type Params = Vec<(&'static str, String)>;

/// Booleans travel as the literal strings `"true"` / `"false"`.
pub fn encode_bool(value: bool) -> String {
    value.to_string()
}

/// Serializes a structured parameter as JSON text, mapping failures through `err`.
pub fn encode_json<T: Serialize + ?Sized>(value: &T, err: fn(String) -> Error) -> Result<String> {
    serde_json::to_string(value).map_err(|e| err(e.to_string()))
}
